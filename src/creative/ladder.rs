// src/creative/ladder.rs

use crate::backend::{Backend, ExecuteOptions};
use crate::circuits::Circuit;
use crate::core::QreativeError;
use crate::operations::Gate;
use std::f64::consts::PI;

/// An integer from `0` to `d` stored on a single qubit.
///
/// Adding rotates the qubit a fraction `delta / d` of the way towards `|1>`.
/// Past `d` the value climbs back down, like walking up and then down a ladder.
#[derive(Debug, Clone)]
pub struct Ladder {
    d: u32,
    circuit: Circuit,
}

impl Ladder {
    /// A ladder with value 0 and maximum `d`.
    pub fn new(d: u32) -> Result<Self, QreativeError> {
        if d == 0 {
            return Err(QreativeError::InvalidState { message: "A ladder needs a maximum of at least 1".to_string() });
        }
        Ok(Self { d, circuit: Circuit::new(1) })
    }

    pub fn max(&self) -> u32 {
        self.d
    }

    /// Changes the value by `delta`, which may be fractional or negative.
    pub fn add(&mut self, delta: f64) -> Result<(), QreativeError> {
        self.circuit.add_gate(Gate::Rx { target: 0, theta: PI * delta / self.d as f64 })
    }

    /// Reads the value from `shots` measurements; more shots give a steadier answer.
    pub fn value(&self, backend: &mut dyn Backend, shots: usize) -> Result<u32, QreativeError> {
        let result = backend.execute(std::slice::from_ref(&self.circuit), &ExecuteOptions::shots(shots))?;
        let p = result.get_counts(0)?.to_distribution().probability("1");
        let value = (2.0 * p.sqrt().asin() * self.d as f64 / PI).round();
        Ok(value as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StateVectorBackend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn climbs_and_descends() -> Result<(), QreativeError> {
        let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(12));
        let mut ladder = Ladder::new(4)?;
        assert_eq!(ladder.value(&mut backend, 1024)?, 0);
        ladder.add(4.0)?;
        assert_eq!(ladder.value(&mut backend, 1024)?, 4);
        ladder.add(2.0)?;
        // two steps past the top
        assert_eq!(ladder.value(&mut backend, 1024)?, 2);
        Ok(())
    }

    #[test]
    fn zero_maximum_is_rejected() {
        assert!(Ladder::new(0).is_err());
    }
}
