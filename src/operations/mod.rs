// src/operations/mod.rs

//! The closed set of gates a circuit may contain, and the measurement bases
//! used to read a qubit.
//!
//! Every circuit is implicitly measured on all of its qubits once its gates
//! have been applied; there is no mid-circuit measurement.

use std::fmt;

/// A gate acting on one or two qubits.
#[derive(Debug, Clone, Copy, PartialEq)] // f64 angles rule out Eq
pub enum Gate {
    /// Bit flip (Pauli X).
    X { target: usize },
    /// Hadamard.
    H { target: usize },
    /// Quarter phase `diag(1, i)`.
    S { target: usize },
    /// Inverse quarter phase `diag(1, -i)`.
    Sdg { target: usize },
    /// Rotation by `theta` about the X axis. A partial flip.
    Rx { target: usize, theta: f64 },
    /// Rotation by `theta` about the Y axis. A partial flip without phase.
    Ry { target: usize, theta: f64 },
    /// Controlled NOT.
    Cx { control: usize, target: usize },
    /// Rotation by `theta` about the Z axis of `target`, applied when `control` is set.
    Crz { control: usize, target: usize, theta: f64 },
}

impl Gate {
    /// Qubits the gate touches, control first.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            Gate::X { target }
            | Gate::H { target }
            | Gate::S { target }
            | Gate::Sdg { target }
            | Gate::Rx { target, .. }
            | Gate::Ry { target, .. } => vec![*target],
            Gate::Cx { control, target } | Gate::Crz { control, target, .. } => vec![*control, *target],
        }
    }

    /// Whether the gate acts on a control and a target qubit.
    pub fn is_controlled(&self) -> bool {
        matches!(self, Gate::Cx { .. } | Gate::Crz { .. })
    }

    /// Short label used in circuit diagrams.
    pub fn symbol(&self) -> &'static str {
        match self {
            Gate::X { .. } => "X",
            Gate::H { .. } => "H",
            Gate::S { .. } => "S",
            Gate::Sdg { .. } => "S†",
            Gate::Rx { .. } => "Rx",
            Gate::Ry { .. } => "Ry",
            Gate::Cx { .. } => "X",
            Gate::Crz { .. } => "Rz",
        }
    }
}

/// The three complementary ways a single boolean can be stored on, and read
/// from, one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basis {
    X,
    Y,
    Z,
}

impl Basis {
    /// Gates that prepare `qubit` (from `|0>`) so that reading it in this basis gives `value`.
    pub fn prepare(self, qubit: usize, value: bool) -> Vec<Gate> {
        match (self, value) {
            (Basis::Z, false) => vec![],
            (Basis::Z, true) => vec![Gate::X { target: qubit }],
            (Basis::X, false) => vec![Gate::H { target: qubit }],
            (Basis::X, true) => vec![Gate::X { target: qubit }, Gate::H { target: qubit }],
            (Basis::Y, false) => vec![Gate::H { target: qubit }, Gate::S { target: qubit }],
            (Basis::Y, true) => vec![Gate::H { target: qubit }, Gate::Sdg { target: qubit }],
        }
    }

    /// Gates applied just before measurement so the Z readout reports this basis.
    pub fn rotate_into(self, qubit: usize) -> Vec<Gate> {
        match self {
            Basis::Z => vec![],
            Basis::X => vec![Gate::H { target: qubit }],
            Basis::Y => vec![Gate::Sdg { target: qubit }, Gate::H { target: qubit }],
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Basis::X => "X",
            Basis::Y => "Y",
            Basis::Z => "Z",
        };
        write!(f, "{}", label)
    }
}
