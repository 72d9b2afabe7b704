// src/walk/hypercube.rs

//! Bit-flip walks over the hypercube of `n`-bit universes.

use super::graph::Graph;
use crate::circuits::Circuit;
use crate::core::{Bitstring, QreativeError};
use crate::operations::Gate;
use rand::Rng;
use rand::seq::IndexedRandom;

/// One step of a hypercube walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    /// Partial flip of one qubit about X.
    X(usize),
    /// Partial flip of one qubit about Y.
    Y(usize),
    /// Partial flip of the first qubit, copied onto the second.
    Xx(usize, usize),
}

impl WalkStep {
    /// The gates realising this step with partial rotations by `rotation`.
    pub fn gates(&self, rotation: f64) -> Vec<Gate> {
        match *self {
            WalkStep::X(q) => vec![Gate::Rx { target: q, theta: rotation }],
            WalkStep::Y(q) => vec![Gate::Ry { target: q, theta: rotation }],
            WalkStep::Xx(a, b) => vec![Gate::Rx { target: a, theta: rotation }, Gate::Cx { control: a, target: b }],
        }
    }
}

/// A start universe and the fixed sequence of steps taken from it.
#[derive(Debug, Clone, PartialEq)]
pub struct HypercubeWalk {
    pub start: Bitstring,
    pub steps: Vec<WalkStep>,
}

impl HypercubeWalk {
    /// The circuit that prepares `start` and applies the first `prefix` steps.
    pub fn circuit(&self, prefix: usize, rotation: f64) -> Result<Circuit, QreativeError> {
        if prefix > self.steps.len() {
            return Err(QreativeError::InvalidStructure {
                message: format!("Prefix {} is longer than the walk ({} steps)", prefix, self.steps.len()),
            });
        }
        let mut circuit = Circuit::new(self.start.len());
        for (q, bit) in self.start.bits().enumerate() {
            if bit {
                circuit.add_gate(Gate::X { target: q })?;
            }
        }
        for step in &self.steps[..prefix] {
            circuit.add_gates(step.gates(rotation))?;
        }
        Ok(circuit)
    }
}

/// Plans a walk of `length` random steps on the qubits of `graph`.
///
/// Each step is a correlated pair flip on a random coupling with probability
/// `pair_probability` (never, if the graph has no couplings), otherwise an X or
/// Y flip on a uniformly random qubit.
pub fn plan_hypercube_walk<R: Rng + ?Sized>(
    graph: &Graph,
    start: Bitstring,
    length: usize,
    pair_probability: f64,
    rng: &mut R,
) -> Result<HypercubeWalk, QreativeError> {
    let n = graph.len();
    if start.len() != n {
        return Err(QreativeError::InvalidState {
            message: format!("Start '{}' has {} bits but the device has {} qubits", start, start.len(), n),
        });
    }
    let pair_probability = pair_probability.clamp(0.0, 1.0);
    let mut steps = Vec::with_capacity(length);
    for _ in 0..length {
        let pair = if rng.random_bool(pair_probability) { graph.edges().choose(rng) } else { None };
        let step = match pair {
            Some((a, b)) => WalkStep::Xx(*a, *b),
            None => {
                let q = rng.random_range(0..n);
                if rng.random_bool(0.5) { WalkStep::X(q) } else { WalkStep::Y(q) }
            }
        };
        steps.push(step);
    }
    Ok(HypercubeWalk { start, steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn planned_steps_stay_on_device() -> Result<(), QreativeError> {
        let graph = Graph::device("ibmqx4")?;
        let mut rng = StdRng::seed_from_u64(17);
        let walk = plan_hypercube_walk(&graph, Bitstring::zeros(5), 200, 0.5, &mut rng)?;
        assert_eq!(walk.steps.len(), 200);
        for step in &walk.steps {
            match step {
                WalkStep::X(q) | WalkStep::Y(q) => assert!(*q < 5),
                WalkStep::Xx(a, b) => assert!(graph.edges().contains(&(*a, *b))),
            }
        }
        Ok(())
    }

    #[test]
    fn no_pairs_without_couplings() -> Result<(), QreativeError> {
        let graph = Graph::new(3);
        let mut rng = StdRng::seed_from_u64(2);
        let walk = plan_hypercube_walk(&graph, Bitstring::zeros(3), 50, 1.0, &mut rng)?;
        assert!(walk.steps.iter().all(|s| !matches!(s, WalkStep::Xx(..))));
        Ok(())
    }

    #[test]
    fn prefix_circuit_prepares_start_then_steps() -> Result<(), QreativeError> {
        let walk = HypercubeWalk {
            start: Bitstring::new("101")?,
            steps: vec![WalkStep::X(1), WalkStep::Xx(0, 2)],
        };
        assert_eq!(walk.circuit(0, 0.5)?.len(), 2);
        assert_eq!(walk.circuit(1, 0.5)?.len(), 3);
        assert_eq!(walk.circuit(2, 0.5)?.len(), 5);
        assert!(walk.circuit(3, 0.5).is_err());
        Ok(())
    }

    #[test]
    fn wrong_start_length_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = plan_hypercube_walk(&Graph::all_to_all(4), Bitstring::zeros(3), 5, 0.3, &mut rng);
        assert!(result.is_err());
    }
}
