// src/creative/qrng.rs

use crate::backend::{Backend, ExecuteOptions};
use crate::circuits::Circuit;
use crate::core::QreativeError;
use crate::operations::Gate;
use log::debug;

/// Qubits measured per shot.
pub const QRNG_QUBITS: usize = 5;
/// Shots taken when the generator is filled.
pub const QRNG_SHOTS: usize = 8192;
/// Largest number of bits per value that fits a `u64` with room for `rand`.
const MAX_PRECISION: usize = 63;

/// Random numbers read from measured qubits.
///
/// One job of [`QRNG_SHOTS`] shots on [`QRNG_QUBITS`] qubits in equal
/// superposition is split into `num` strings of `precision` bits. The values
/// are handed out in order and start over once all have been used.
#[derive(Debug, Clone)]
pub struct Qrng {
    precision: usize,
    bits: Vec<String>,
    values: Vec<u64>,
    next: usize,
}

impl Qrng {
    /// A generator of `num` values, each of `floor(5 * 8192 / num)` bits.
    pub fn new(num: usize, backend: &mut dyn Backend) -> Result<Self, QreativeError> {
        if num == 0 {
            return Err(QreativeError::InvalidState { message: "A generator needs at least one value".to_string() });
        }
        Self::fill(num, QRNG_QUBITS * QRNG_SHOTS / num, backend)
    }

    /// A generator of values with `precision` bits each, as many as the shots allow.
    pub fn with_precision(precision: usize, backend: &mut dyn Backend) -> Result<Self, QreativeError> {
        if precision == 0 {
            return Err(QreativeError::InvalidState { message: "Values need at least one bit".to_string() });
        }
        Self::fill(QRNG_QUBITS * QRNG_SHOTS / precision, precision, backend)
    }

    fn fill(num: usize, precision: usize, backend: &mut dyn Backend) -> Result<Self, QreativeError> {
        if !(1..=MAX_PRECISION).contains(&precision) {
            return Err(QreativeError::InvalidState {
                message: format!("{} values would need {} bits each; 1 to {} are supported", num, precision, MAX_PRECISION),
            });
        }
        let mut circuit = Circuit::new(QRNG_QUBITS);
        for q in 0..QRNG_QUBITS {
            circuit.add_gate(Gate::H { target: q })?;
        }
        let result = backend.execute(&[circuit], &ExecuteOptions::shots(QRNG_SHOTS).with_memory())?;
        let stream: String = result.get_memory(0)?.concat();
        if stream.len() < num * precision {
            return Err(QreativeError::Backend {
                message: format!("Backend returned {} random bits, {} are needed", stream.len(), num * precision),
            });
        }

        let bits: Vec<String> = stream
            .as_bytes()
            .chunks(precision)
            .take(num)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect();
        let values = bits
            .iter()
            .map(|b| {
                u64::from_str_radix(b, 2).map_err(|_| QreativeError::Backend {
                    message: format!("Backend memory '{}' is not binary", b),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("qrng filled with {} values of {} bits", num, precision);
        Ok(Self { precision, bits, values, next: 0 })
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Number of values before the sequence repeats.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw bitstrings behind the values.
    pub fn bitstrings(&self) -> &[String] {
        &self.bits
    }

    fn advance(&mut self) -> u64 {
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        value
    }

    /// Next value as an integer in `[0, 2^precision)`.
    pub fn rand_int(&mut self) -> u64 {
        self.advance()
    }

    /// Next value as a float in `[0, 1)`.
    pub fn rand(&mut self) -> f64 {
        self.advance() as f64 / (1u64 << self.precision) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StateVectorBackend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn values_fit_precision_and_cycle() -> Result<(), QreativeError> {
        let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(99));
        let mut qrng = Qrng::new(1280, &mut backend)?;
        assert_eq!(qrng.precision(), 32);
        assert_eq!(qrng.len(), 1280);
        let first: Vec<u64> = (0..qrng.len()).map(|_| qrng.rand_int()).collect();
        assert!(first.iter().all(|v| *v < 1u64 << 32));
        assert_eq!(qrng.rand_int(), first[0]);
        let x = qrng.rand();
        assert!((0.0..1.0).contains(&x));
        Ok(())
    }

    #[test]
    fn precision_sets_the_count() -> Result<(), QreativeError> {
        let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(7));
        let qrng = Qrng::with_precision(8, &mut backend)?;
        assert_eq!(qrng.len(), 5120);
        assert!(qrng.bitstrings().iter().all(|b| b.len() == 8));
        Ok(())
    }

    #[test]
    fn too_few_values_need_too_many_bits() {
        let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(7));
        assert!(Qrng::new(10, &mut backend).is_err());
        assert!(Qrng::new(0, &mut backend).is_err());
        assert!(Qrng::with_precision(64, &mut backend).is_err());
    }
}
