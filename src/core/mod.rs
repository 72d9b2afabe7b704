// src/core/mod.rs

//! Core data structures and types

pub mod bitstring;
pub mod error;
pub mod state;
pub mod stats;

// Re-export public types for convenient access via `qreative::core::TypeName`
pub use bitstring::Bitstring;
pub use error::QreativeError;
pub use state::StateVector;
pub use stats::{Counts, Distribution};

pub mod constants;
