// src/creative/twobit.rs

use crate::backend::{Backend, ExecuteOptions};
use crate::circuits::Circuit;
use crate::core::QreativeError;
use crate::operations::Basis;
use rand::Rng;

/// Fractions of `1` outcomes below this read as a definite `false`.
const MITIGATION_LOW: f64 = 0.1;
/// Fractions above this read as a definite `true`.
const MITIGATION_HIGH: f64 = 0.9;

/// One boolean per measurement basis, stored on a single qubit.
///
/// The bases are complementary: a value stored in one basis leaves the others
/// random, and reading a basis overwrites whatever the others held.
#[derive(Debug, Clone)]
pub struct TwoBit {
    circuit: Circuit,
}

impl TwoBit {
    /// A twobit prepared in the Y basis, so X and Z readouts are both random.
    pub fn new() -> Result<Self, QreativeError> {
        let mut twobit = Self { circuit: Circuit::new(1) };
        twobit.prepare(Basis::Y, false)?;
        Ok(twobit)
    }

    /// Stores `value` in `basis`, discarding the previous state.
    pub fn prepare(&mut self, basis: Basis, value: bool) -> Result<(), QreativeError> {
        let mut circuit = Circuit::new(1);
        circuit.add_gates(basis.prepare(0, value))?;
        self.circuit = circuit;
        Ok(())
    }

    /// Reads the value stored in `basis`.
    ///
    /// The fraction `p` of `1` outcomes over `shots` is turned into a boolean
    /// by comparing it with a uniform draw. With `mitigate`, fractions below
    /// 0.1 or above 0.9 are first snapped to 0 or 1 to suppress device noise.
    /// Afterwards the qubit is re-prepared with the value read, so repeating
    /// the same readout gives the same answer.
    pub fn value<R: Rng + ?Sized>(
        &mut self,
        basis: Basis,
        backend: &mut dyn Backend,
        shots: usize,
        mitigate: bool,
        rng: &mut R,
    ) -> Result<bool, QreativeError> {
        let mut readout = self.circuit.clone();
        readout.add_gates(basis.rotate_into(0))?;
        let result = backend.execute(std::slice::from_ref(&readout), &ExecuteOptions::shots(shots))?;
        let mut p = result.get_counts(0)?.to_distribution().probability("1");
        if mitigate {
            if p < MITIGATION_LOW {
                p = 0.0;
            } else if p > MITIGATION_HIGH {
                p = 1.0;
            }
        }
        let measured = p > rng.random::<f64>();
        self.prepare(basis, measured)?;
        Ok(measured)
    }
}
