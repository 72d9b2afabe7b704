// src/creative/mod.rs

//! Small creative uses of qubits: integers and booleans stored on one qubit,
//! Bell-pair correlations, superposed strings, random numbers and grids of
//! partially flipped qubits.
//!
//! Everything here runs through a [`Backend`](crate::backend::Backend), so the
//! same code works on the exact simulator or the classical stand-in.

mod bell;
mod ladder;
mod qrng;
mod random_grid;
mod superposer;
mod twobit;

pub use bell::{BellCorrelation, bell_correlation};
pub use ladder::Ladder;
pub use qrng::{QRNG_QUBITS, QRNG_SHOTS, Qrng};
pub use random_grid::{Axis, GridSamples, RandomGrid};
pub use superposer::{EMOTICON_ENCODING, bitstring_superposer, emoticon_superposer};
pub use twobit::TwoBit;
