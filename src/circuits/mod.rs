// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! gates (`qreative::operations::Gate`) on a fixed-size qubit register.
//!
//! A `Circuit` is always measured on every qubit after its last gate; the
//! measured string has qubit 0 as its leftmost character.

use crate::core::QreativeError;
use crate::operations::Gate;
use std::fmt;

/// An ordered sequence of gates on `num_qubits` qubits.
#[derive(Clone, PartialEq)] // PartialEq useful for testing circuits
pub struct Circuit {
    /// Register size. Gates may only address qubits below this.
    num_qubits: usize,

    /// The ordered sequence of gates. Order is significant.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates a new, empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self { num_qubits, gates: Vec::new() }
    }

    /// Appends a gate after checking that it addresses qubits of this register.
    ///
    /// # Errors
    /// `InvalidStructure` if a qubit index is out of range or a controlled gate
    /// uses the same qubit as control and target.
    pub fn add_gate(&mut self, gate: Gate) -> Result<(), QreativeError> {
        let qubits = gate.qubits();
        if let Some(q) = qubits.iter().find(|q| **q >= self.num_qubits) {
            return Err(QreativeError::InvalidStructure {
                message: format!("Gate {:?} addresses qubit {} of a {}-qubit circuit", gate, q, self.num_qubits),
            });
        }
        if gate.is_controlled() && qubits[0] == qubits[1] {
            return Err(QreativeError::InvalidStructure {
                message: format!("Control and target of {:?} cannot both be qubit {}", gate, qubits[0]),
            });
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Appends several gates, stopping at the first invalid one.
    pub fn add_gates<I>(&mut self, gates: I) -> Result<(), QreativeError>
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns a slice containing the ordered sequence of gates.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

/// Chained construction of a [`Circuit`]; the first invalid gate is reported by [`build`](Self::build).
#[derive(Debug)]
pub struct CircuitBuilder {
    circuit: Circuit,
    error: Option<QreativeError>,
}

impl CircuitBuilder {
    /// Creates a builder for a circuit on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self { circuit: Circuit::new(num_qubits), error: None }
    }

    /// Adds a single gate to the circuit being built.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.circuit.add_gate(gate) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Adds multiple gates from an iterator.
    pub fn add_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self = self.add_gate(gate);
        }
        self
    }

    /// Finalizes construction.
    pub fn build(self) -> Result<Circuit, QreativeError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "qreative::Circuit[{} gates on {} qubits]", self.gates.len(), self.num_qubits)?;
        if self.num_qubits == 0 {
            return Ok(());
        }

        const GATE_WIDTH: usize = 7; // e.g., "───H───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        let num_gates = self.gates.len();
        let label_width = format!("q{}", self.num_qubits - 1).len();
        let label_padding = " ".repeat(label_width + 2);

        // grid[row][time] holds one gate cell; v_connect[row][time] the connector below it
        let mut grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_gates]; self.num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_gates]; self.num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        for (t, gate) in self.gates.iter().enumerate() {
            match gate {
                Gate::Cx { control, target } | Gate::Crz { control, target, .. } => {
                    grid[*control][t] = format_gate("@");
                    grid[*target][t] = format_gate(gate.symbol());
                    let r_min = (*control).min(*target);
                    let r_max = (*control).max(*target);
                    for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row[t] = V_WIRE;
                    }
                }
                _ => {
                    for q in gate.qubits() {
                        grid[q][t] = format_gate(gate.symbol());
                    }
                }
            }
        }

        for r in 0..self.num_qubits {
            write!(f, "{:<width$}", format!("q{}: ", r), width = label_width + 2)?;
            writeln!(f, "{}──M", grid[r].join(""))?;
            if r < self.num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_gates {
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), v_connect[r][t], " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_qubits() {
        let mut circuit = Circuit::new(2);
        assert!(circuit.add_gate(Gate::X { target: 1 }).is_ok());
        assert!(circuit.add_gate(Gate::X { target: 2 }).is_err());
        assert!(circuit.add_gate(Gate::Cx { control: 0, target: 0 }).is_err());
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn builder_reports_first_error() {
        let result = CircuitBuilder::new(1)
            .add_gate(Gate::H { target: 0 })
            .add_gate(Gate::Cx { control: 0, target: 1 })
            .build();
        assert!(matches!(result, Err(QreativeError::InvalidStructure { .. })));
    }

    #[test]
    fn diagram_has_one_row_per_qubit() -> Result<(), QreativeError> {
        let circuit = CircuitBuilder::new(2)
            .add_gate(Gate::H { target: 0 })
            .add_gate(Gate::Cx { control: 0, target: 1 })
            .build()?;
        let text = circuit.to_string();
        assert!(text.starts_with("qreative::Circuit[2 gates on 2 qubits]"));
        assert!(text.contains("q0: "));
        assert!(text.contains("q1: "));
        assert!(text.contains('@'));
        Ok(())
    }
}
