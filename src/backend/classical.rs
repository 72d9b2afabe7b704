// src/backend/classical.rs

//! A stochastic bit-flip stand-in for a quantum device.
//!
//! Each shot carries a classical bit register through the circuit: a rotation
//! by `theta` flips its qubit with probability `sin^2(theta / 2)`, `H` replaces
//! the bit with a fair coin, phase gates (controlled or not) do nothing and `Cx` flips the target
//! when the control is set. Interference is not modelled, so the counts match a
//! real device only for circuits whose statistics are classical mixtures.

use crate::backend::{Backend, ExecuteOptions, ExecutionResult};
use crate::circuits::Circuit;
use crate::core::{Counts, QreativeError};
use crate::operations::Gate;
use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

#[derive(Debug)]
pub struct ClassicalBackend {
    rng: StdRng,
}

impl ClassicalBackend {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    fn run_shot(&mut self, circuit: &Circuit) -> String {
        let mut bits = vec![false; circuit.num_qubits()];
        for gate in circuit.gates() {
            match *gate {
                Gate::X { target } => bits[target] = !bits[target],
                Gate::H { target } => bits[target] = self.rng.random_bool(0.5),
                Gate::S { .. } | Gate::Sdg { .. } | Gate::Crz { .. } => {}
                Gate::Rx { target, theta } | Gate::Ry { target, theta } => {
                    let flip = (theta / 2.0).sin().powi(2).clamp(0.0, 1.0);
                    if self.rng.random_bool(flip) {
                        bits[target] = !bits[target];
                    }
                }
                Gate::Cx { control, target } => {
                    if bits[control] {
                        bits[target] = !bits[target];
                    }
                }
            }
        }
        bits.iter().map(|b| if *b { '1' } else { '0' }).collect()
    }
}

impl Backend for ClassicalBackend {
    fn name(&self) -> &str {
        "classical"
    }

    fn execute(&mut self, circuits: &[Circuit], options: &ExecuteOptions) -> Result<ExecutionResult, QreativeError> {
        let mut all_counts = Vec::with_capacity(circuits.len());
        let mut all_memory = Vec::new();
        for (index, circuit) in circuits.iter().enumerate() {
            if circuit.num_qubits() == 0 {
                return Err(QreativeError::Backend { message: format!("Circuit {} has no qubits to measure", index) });
            }
            let shots: Vec<String> = (0..options.shots).map(|_| self.run_shot(circuit)).collect();
            let mut counts = Counts::new();
            for outcome in &shots {
                counts.record(outcome.as_str());
            }
            debug!("classical circuit {} ({} gates): {} distinct outcomes", index, circuit.len(), counts.len());
            all_counts.push(counts);
            if options.memory {
                all_memory.push(shots);
            }
        }
        Ok(ExecutionResult::new(all_counts, options.memory.then_some(all_memory)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn deterministic_gates_give_one_outcome() -> Result<(), QreativeError> {
        let mut backend = ClassicalBackend::new(StdRng::seed_from_u64(5));
        let mut circuit = Circuit::new(3);
        circuit.add_gates([Gate::X { target: 0 }, Gate::Cx { control: 0, target: 2 }, Gate::S { target: 1 }])?;
        let result = backend.execute(&[circuit], &ExecuteOptions::shots(64))?;
        let counts = result.get_counts(0)?;
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("101"), 64);
        Ok(())
    }

    #[test]
    fn half_rotation_is_roughly_fair() -> Result<(), QreativeError> {
        let mut backend = ClassicalBackend::new(StdRng::seed_from_u64(9));
        let mut circuit = Circuit::new(1);
        circuit.add_gate(Gate::Ry { target: 0, theta: std::f64::consts::FRAC_PI_2 })?;
        let result = backend.execute(&[circuit], &ExecuteOptions::shots(4000))?;
        let p = result.get_counts(0)?.to_distribution().probability("1");
        assert!((p - 0.5).abs() < 0.05, "p = {}", p);
        Ok(())
    }
}
