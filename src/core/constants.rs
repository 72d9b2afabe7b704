// src/core/constants.rs

//! Constants shared by walk generation and play.

/// Coupling maps and sizes of the devices known by name.
pub mod devices {
    /// Qubit count of the 5-qubit "bowtie" devices.
    pub const IBMQX4_QUBITS: usize = 5;
    /// Directed coupling map of `ibmqx4`; `(control, target)` pairs a `Cx` may use.
    pub const IBMQX4_COUPLING: [(usize, usize); 6] = [(1, 0), (2, 0), (2, 1), (3, 2), (3, 4), (2, 4)];
    /// Directed coupling map of `ibmq_5_tenerife`.
    pub const TENERIFE_COUPLING: [(usize, usize); 6] = [(1, 0), (2, 0), (2, 1), (3, 2), (3, 4), (4, 2)];

    /// Looks up the coupling map of a named device.
    pub fn coupling_map(name: &str) -> Option<(usize, &'static [(usize, usize)])> {
        match name {
            "ibmqx4" => Some((IBMQX4_QUBITS, &IBMQX4_COUPLING)),
            "ibmq_5_tenerife" => Some((IBMQX4_QUBITS, &TENERIFE_COUPLING)),
            _ => None,
        }
    }
}

/// Defaults of the "Running out of Hilbert space" game.
pub mod game {
    /// States weaker than this are hazardous once immunity has run out.
    pub const HAZARD_THRESHOLD: f64 = 0.005;
    /// Turns of protection from weak universes at the start of a session.
    pub const IMMUNITY: u32 = 3;
    /// Chance per turn that a portal malfunctions.
    pub const MALFUNCTION_PROBABILITY: f64 = 0.25;
    /// Score a classic session starts with.
    pub const INITIAL_SCORE: f64 = 100.0;
    /// Minimum Hamming distance between start and target.
    pub const MIN_DISTANCE: usize = 3;
    /// Score floor applied when a classic session lands on an unseen universe.
    pub const SCORE_FLOOR: f64 = 0.0;
}

/// Defaults of walk generation and circuit execution.
pub mod walk {
    use std::f64::consts::PI;

    /// Rotation angle of every partial flip in a walk.
    pub const ROTATION: f64 = PI / 4.0;
    /// Probability a hypercube step is a correlated pair flip.
    pub const PAIR_PROBABILITY: f64 = 1.0 / 3.0;
    /// Shots per circuit unless configured otherwise.
    pub const SHOTS: usize = 1024;
    /// Walk length used by the game.
    pub const LENGTH: usize = 30;
    /// Samples generated for the game.
    pub const SAMPLES: usize = 10;
}
