// src/game/mod.rs

//! "Running out of Hilbert space": find the target universe by hopping
//! between neighbouring bitstrings before the multiverse collapses.
//!
//! [`Session`] holds the rules and [`Console`] drives one over any reader and
//! writer. Rendering helpers and the game's text live in [`render`] and
//! [`lore`].

mod console;
pub mod lore;
pub mod render;
mod session;

pub use console::{Console, parse_direction};
pub use session::{GameConfig, Session, Status, TurnReport, Variant};
