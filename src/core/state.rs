// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitudes of an `n`-qubit register before measurement.
///
/// Basis index `k` is read as an `n`-bit string whose leftmost character is
/// qubit 0, so qubit `q` lives at bit position `n - 1 - q` of `k`.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// The all-zero basis state `|0...0>`. Returns `None` if `2^n` overflows.
    pub fn zero_state(num_qubits: usize) -> Option<Self> {
        let dim = 1usize.checked_shl(num_qubits as u32)?;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Some(Self { amplitudes, num_qubits })
    }

    /// Provides read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn replace(&mut self, amplitudes: Vec<Complex<f64>>) {
        debug_assert_eq!(amplitudes.len(), self.amplitudes.len());
        self.amplitudes = amplitudes;
    }

    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Born-rule probability of each basis index.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Bit position inside a basis index that holds `qubit`.
    pub(crate) fn bit_position(&self, qubit: usize) -> usize {
        self.num_qubits - 1 - qubit
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
