// src/backend/engine.rs
use crate::backend::{Backend, ExecuteOptions, ExecutionResult};
use crate::circuits::Circuit;
use crate::core::{Counts, QreativeError, StateVector};
use crate::operations::Gate;
use log::debug;
use num_complex::Complex;
use num_traits::Zero; // For Complex::zero()
use rand::Rng;
use rand::rngs::StdRng;
use std::f64::consts::FRAC_1_SQRT_2;

/// Largest register simulated exactly.
const MAX_QUBITS: usize = 24;

/// Evolves the amplitudes of one circuit's register gate by gate.
/// (Internal visibility)
#[derive(Debug)]
pub(crate) struct SimulationEngine {
    /// Global amplitudes of all `num_qubits` qubits; dimension `2^n`.
    state: StateVector,
}

impl SimulationEngine {
    /// Initializes the register in `|0...0>`.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, QreativeError> {
        if num_qubits == 0 {
            return Err(QreativeError::Backend { message: "Cannot initialize simulation engine with zero qubits".to_string() });
        }
        if num_qubits > MAX_QUBITS {
            return Err(QreativeError::Backend {
                message: format!("{} qubits is more than the {} this simulator can hold", num_qubits, MAX_QUBITS),
            });
        }
        let state = StateVector::zero_state(num_qubits).ok_or_else(|| QreativeError::Backend {
            message: "Number of qubits too large, resulting state vector dimension overflows usize.".to_string(),
        })?;
        Ok(Self { state })
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies a single gate to the global state.
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), QreativeError> {
        match *gate {
            Gate::Cx { control, target } | Gate::Crz { control, target, .. } => {
                let matrix = controlled_matrix(gate).ok_or_else(|| QreativeError::Backend {
                    message: format!("No two-qubit matrix for {:?}", gate),
                })?;
                self.apply_two_qubit_gate(control, target, &matrix)
            }
            Gate::X { target }
            | Gate::H { target }
            | Gate::S { target }
            | Gate::Sdg { target }
            | Gate::Rx { target, .. }
            | Gate::Ry { target, .. } => {
                let matrix = single_qubit_matrix(gate).ok_or_else(|| QreativeError::Backend {
                    message: format!("No single-qubit matrix for {:?}", gate),
                })?;
                self.apply_single_qubit_gate(target, &matrix)
            }
        }
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), QreativeError> {
        if qubit >= self.state.num_qubits() {
            return Err(QreativeError::Backend {
                message: format!("Qubit {} not found in a {}-qubit register", qubit, self.state.num_qubits()),
            });
        }
        Ok(())
    }

    /// Applies a 2x2 matrix to one qubit of the global state vector.
    fn apply_single_qubit_gate(&mut self, qubit: usize, matrix: &[[Complex<f64>; 2]; 2]) -> Result<(), QreativeError> {
        self.check_qubit(qubit)?;
        let k = self.state.bit_position(qubit);
        let k_mask = 1 << k;
        let dim = self.state.dim();
        let psi = self.state.vector();
        let mut new_vec = vec![Complex::zero(); dim];

        // Iterate over pairs of basis states differing only at the target position
        for i in 0..dim / 2 {
            let i0 = insert_zero_bit(i, k);
            let i1 = i0 | k_mask;
            let (psi_0, psi_1) = (psi[i0], psi[i1]);
            new_vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            new_vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }

        self.state.replace(new_vec);
        Ok(())
    }

    /// Applies a 4x4 matrix to the pair `(first, second)`; matrix rows are
    /// indexed by `2 * b_first + b_second`.
    fn apply_two_qubit_gate(&mut self, first: usize, second: usize, matrix: &[[Complex<f64>; 4]; 4]) -> Result<(), QreativeError> {
        self.check_qubit(first)?;
        self.check_qubit(second)?;
        if first == second {
            return Err(QreativeError::Backend { message: "Target qubits of a two-qubit gate cannot be the same".to_string() });
        }

        let k_first = self.state.bit_position(first);
        let k_second = self.state.bit_position(second);
        let (k_low, k_high) = (k_first.min(k_second), k_first.max(k_second));
        let dim = self.state.dim();
        let psi_all = self.state.vector();
        let mut new_vec = vec![Complex::zero(); dim];

        // Iterate through all combinations of the other (n-2) qubits
        for i_other in 0..(dim / 4) {
            let i_base = insert_zero_bit(insert_zero_bit(i_other, k_low), k_high);
            let indices = [
                i_base,
                i_base | (1 << k_second),
                i_base | (1 << k_first),
                i_base | (1 << k_first) | (1 << k_second),
            ];

            let psi = indices.map(|idx| psi_all[idx]);
            for (row, idx) in indices.iter().enumerate() {
                new_vec[*idx] = (0..4).fold(Complex::zero(), |acc, col| acc + matrix[row][col] * psi[col]);
            }
        }

        self.state.replace(new_vec);
        Ok(())
    }

    /// Draws `shots` measurement outcomes of every qubit from |amplitude|^2.
    pub(crate) fn sample<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> Vec<String> {
        let n = self.state.num_qubits();
        let mut cumulative = Vec::with_capacity(self.state.dim());
        let mut total = 0.0;
        for p in self.state.probabilities() {
            total += p;
            cumulative.push(total);
        }
        (0..shots)
            .map(|_| {
                let p_sample = rng.random::<f64>() * total;
                // Guard against p_sample landing exactly on the upper edge
                let k = cumulative.partition_point(|c| *c <= p_sample).min(cumulative.len() - 1);
                format!("{:0width$b}", k, width = n)
            })
            .collect()
    }
}

/// Spreads the bits of `value` at and above `position` one place left, leaving a zero there.
fn insert_zero_bit(value: usize, position: usize) -> usize {
    let lower_mask = (1 << position) - 1;
    ((value & !lower_mask) << 1) | (value & lower_mask)
}

/// 2x2 unitary of a single-qubit gate; `None` for controlled gates.
fn single_qubit_matrix(gate: &Gate) -> Option<[[Complex<f64>; 2]; 2]> {
    let one = Complex::new(1.0, 0.0);
    let zero = Complex::zero();
    let i = Complex::i();
    let matrix = match gate {
        Gate::X { .. } => [[zero, one], [one, zero]],
        Gate::H { .. } => [
            [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(FRAC_1_SQRT_2, 0.0)],
            [Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(-FRAC_1_SQRT_2, 0.0)],
        ],
        Gate::S { .. } => [[one, zero], [zero, i]],
        Gate::Sdg { .. } => [[one, zero], [zero, -i]],
        Gate::Rx { theta, .. } => {
            // Rx(theta) = [[cos(a), -i*sin(a)], [-i*sin(a), cos(a)]] where a=theta/2
            let (sin_a, cos_a) = (theta / 2.0).sin_cos();
            [[Complex::new(cos_a, 0.0), -i * sin_a], [-i * sin_a, Complex::new(cos_a, 0.0)]]
        }
        Gate::Ry { theta, .. } => {
            // Ry(theta) = [[cos(a), -sin(a)], [sin(a), cos(a)]] where a=theta/2
            let (sin_a, cos_a) = (theta / 2.0).sin_cos();
            [[Complex::new(cos_a, 0.0), Complex::new(-sin_a, 0.0)], [Complex::new(sin_a, 0.0), Complex::new(cos_a, 0.0)]]
        }
        Gate::Cx { .. } | Gate::Crz { .. } => return None,
    };
    Some(matrix)
}

/// 4x4 unitary of a controlled gate in the basis |control, target>; `None`
/// for single-qubit gates.
fn controlled_matrix(gate: &Gate) -> Option<[[Complex<f64>; 4]; 4]> {
    let one = Complex::new(1.0, 0.0);
    let zero = Complex::zero();
    let matrix = match gate {
        Gate::Cx { .. } => [
            [one, zero, zero, zero],
            [zero, one, zero, zero],
            [zero, zero, zero, one],
            [zero, zero, one, zero],
        ],
        Gate::Crz { theta, .. } => {
            // Rz(theta) = diag(e^{-i theta/2}, e^{i theta/2}) on the control-set block
            let half = theta / 2.0;
            [
                [one, zero, zero, zero],
                [zero, one, zero, zero],
                [zero, zero, Complex::from_polar(1.0, -half), zero],
                [zero, zero, zero, Complex::from_polar(1.0, half)],
            ]
        }
        _ => return None,
    };
    Some(matrix)
}

/// Exact amplitude simulation with shot sampling.
#[derive(Debug)]
pub struct StateVectorBackend {
    rng: StdRng,
}

impl StateVectorBackend {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Backend for StateVectorBackend {
    fn name(&self) -> &str {
        "statevector"
    }

    fn execute(&mut self, circuits: &[Circuit], options: &ExecuteOptions) -> Result<ExecutionResult, QreativeError> {
        let mut all_counts = Vec::with_capacity(circuits.len());
        let mut all_memory = Vec::new();
        for (index, circuit) in circuits.iter().enumerate() {
            let mut engine = SimulationEngine::init(circuit.num_qubits())?;
            for gate in circuit.gates() {
                engine.apply_gate(gate)?;
            }
            let shots = engine.sample(options.shots, &mut self.rng);
            let mut counts = Counts::new();
            for outcome in &shots {
                counts.record(outcome.as_str());
            }
            debug!("statevector circuit {} ({} gates): {} distinct outcomes", index, circuit.len(), counts.len());
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
    use std::f64::consts::PI;

    const TEST_TOLERANCE: f64 = 1e-9;

    fn run(num_qubits: usize, gates: &[Gate]) -> Result<SimulationEngine, QreativeError> {
        let mut engine = SimulationEngine::init(num_qubits)?;
        for gate in gates {
            engine.apply_gate(gate)?;
        }
        Ok(engine)
    }

    #[test]
    fn flip_moves_all_weight() -> Result<(), QreativeError> {
        let engine = run(3, &[Gate::X { target: 1 }])?;
        let probs = engine.state().probabilities();
        // qubit 1 is the middle character: "010" = index 2
        assert!((probs[2] - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn cx_copies_control() -> Result<(), QreativeError> {
        let engine = run(2, &[Gate::H { target: 0 }, Gate::Cx { control: 0, target: 1 }])?;
        let probs = engine.state().probabilities();
        assert!((probs[0] - 0.5).abs() < TEST_TOLERANCE);
        assert!((probs[3] - 0.5).abs() < TEST_TOLERANCE);
        assert!(probs[1].abs() < TEST_TOLERANCE && probs[2].abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn cx_respects_distant_qubits() -> Result<(), QreativeError> {
        let engine = run(4, &[Gate::X { target: 3 }, Gate::Cx { control: 3, target: 0 }])?;
        let probs = engine.state().probabilities();
        // "1001" = 9
        assert!((probs[9] - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn partial_rotation_flips_with_sin_squared() -> Result<(), QreativeError> {
        let theta = PI / 4.0;
        for gate in [Gate::Rx { target: 0, theta }, Gate::Ry { target: 0, theta }] {
            let probs = run(1, &[gate])?.state().probabilities();
            assert!((probs[1] - (theta / 2.0).sin().powi(2)).abs() < TEST_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn matrices_match_gate_arity() {
        assert!(single_qubit_matrix(&Gate::Cx { control: 0, target: 1 }).is_none());
        assert!(single_qubit_matrix(&Gate::Crz { control: 0, target: 1, theta: PI }).is_none());
        assert!(controlled_matrix(&Gate::H { target: 0 }).is_none());
        assert!(single_qubit_matrix(&Gate::S { target: 0 }).is_some());
    }

    #[test]
    fn conjugated_crz_acts_as_controlled_flip() -> Result<(), QreativeError> {
        let flip = [Gate::H { target: 1 }, Gate::Crz { control: 0, target: 1, theta: PI }, Gate::H { target: 1 }];
        let probs = run(2, &flip)?.state().probabilities();
        assert!((probs[0] - 1.0).abs() < TEST_TOLERANCE);

        let mut gates = vec![Gate::X { target: 0 }];
        gates.extend(flip);
        let probs = run(2, &gates)?.state().probabilities();
        // "11" = 3
        assert!((probs[3] - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn y_preparation_reads_back_in_y() -> Result<(), QreativeError> {
        use crate::operations::Basis;
        for value in [false, true] {
            let mut gates = Basis::Y.prepare(0, value);
            gates.extend(Basis::Y.rotate_into(0));
            let probs = run(1, &gates)?.state().probabilities();
            let expected = if value { 1 } else { 0 };
            assert!((probs[expected] - 1.0).abs() < TEST_TOLERANCE);
        }
        Ok(())
    }

    #[test]
    fn backend_counts_sum_to_shots() -> Result<(), QreativeError> {
        let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(11));
        let mut circuit = Circuit::new(2);
        circuit.add_gate(Gate::H { target: 0 })?;
        let result = backend.execute(&[circuit], &ExecuteOptions::shots(500).with_memory())?;
        let counts = result.get_counts(0)?;
        assert_eq!(counts.total(), 500);
        assert_eq!(counts.get("01"), 0);
        assert_eq!(result.get_memory(0)?.len(), 500);
        Ok(())
    }
}
