// src/creative/random_grid.rs

use crate::backend::{Backend, ExecuteOptions};
use crate::circuits::Circuit;
use crate::core::QreativeError;
use crate::operations::Gate;
use crate::walk::Graph;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Axis of a partial flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Grid-shaped outcomes of a [`RandomGrid`] run.
///
/// Each outcome is drawn as `height` lines of `width` bits, the first line
/// being row `y = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSamples {
    pub counts: BTreeMap<String, usize>,
    /// One grid per shot, in the order the shots were taken.
    pub memory: Vec<String>,
}

/// A `width` x `height` grid of qubits, one per cell, that can be partially
/// flipped and entangled with its neighbours to make random patterns.
#[derive(Debug, Clone)]
pub struct RandomGrid {
    width: usize,
    height: usize,
    layout: Graph,
    circuit: Circuit,
}

impl RandomGrid {
    pub fn new(width: usize, height: usize) -> Result<Self, QreativeError> {
        if width == 0 || height == 0 {
            return Err(QreativeError::InvalidStructure {
                message: format!("A {}x{} grid has no cells", width, height),
            });
        }
        Ok(Self { width, height, layout: Graph::grid(width, height), circuit: Circuit::new(width * height) })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    fn address(&self, (x, y): (usize, usize)) -> Result<usize, QreativeError> {
        if x >= self.width || y >= self.height {
            return Err(QreativeError::InvalidStructure {
                message: format!("Cell ({}, {}) is outside the {}x{} grid", x, y, self.width, self.height),
            });
        }
        Ok(y * self.width + x)
    }

    /// Cells sharing an edge with `(x, y)`.
    pub fn neighbours(&self, coords: (usize, usize)) -> Result<Vec<(usize, usize)>, QreativeError> {
        let node = self.address(coords)?;
        Ok(self.layout.neighbours(node).iter().map(|n| (n % self.width, n / self.width)).collect())
    }

    /// Rotates the cell by `PI * frac` about `axis`; `frac = 1` is a full NOT.
    pub fn not(&mut self, coords: (usize, usize), frac: f64, axis: Axis) -> Result<(), QreativeError> {
        let target = self.address(coords)?;
        let theta = PI * frac;
        let gate = match axis {
            Axis::X => Gate::Rx { target, theta },
            Axis::Y => Gate::Ry { target, theta },
        };
        self.circuit.add_gate(gate)
    }

    /// The partial NOT of [`not`](Self::not) on `target`, applied only when `control` is set.
    pub fn cnot(
        &mut self,
        control: (usize, usize),
        target: (usize, usize),
        frac: f64,
        axis: Axis,
    ) -> Result<(), QreativeError> {
        let control = self.address(control)?;
        let target = self.address(target)?;
        let rotation = Gate::Crz { control, target, theta: PI * frac };
        let gates = match axis {
            Axis::X => vec![Gate::H { target }, rotation, Gate::H { target }],
            Axis::Y => vec![
                Gate::Sdg { target },
                Gate::H { target },
                rotation,
                Gate::H { target },
                Gate::S { target },
            ],
        };
        self.circuit.add_gates(gates)
    }

    /// Lays a measured bitstring out as grid rows.
    pub fn to_grid(&self, outcome: &str) -> String {
        let chars: Vec<char> = outcome.chars().collect();
        chars.chunks(self.width).map(|row| row.iter().collect::<String>()).collect::<Vec<_>>().join("\n")
    }

    /// Runs the grid `shots` times and returns the outcomes drawn as grids.
    pub fn samples(&self, backend: &mut dyn Backend, shots: usize) -> Result<GridSamples, QreativeError> {
        let options = ExecuteOptions::shots(shots).with_memory();
        let result = backend.execute(std::slice::from_ref(&self.circuit), &options)?;
        let counts = result.get_counts(0)?.iter().map(|(outcome, n)| (self.to_grid(outcome), n)).collect();
        let memory = result.get_memory(0)?.iter().map(|outcome| self.to_grid(outcome)).collect();
        Ok(GridSamples { counts, memory })
    }
}
