// src/walk/mod.rs

//! Random-walk statistics over a qubit connectivity structure.
//!
//! A walk is planned classically, then one circuit per prefix length is run on
//! a [`Backend`]. The measured counts of each prefix become that step's
//! statistics table, so every sample yields `length + 1` tables.
//!
//! Two structures are supported:
//! * [`Structure::Hypercube`]: the register itself is the walker, moving
//!   through all `n`-bit strings by partial bit flips. Tables are keyed by
//!   bitstring.
//! * [`Structure::Graph`]: a single excitation diffuses along a self-avoiding
//!   path of the graph. Tables hold the probability that each node is active,
//!   keyed by the node index in decimal.

mod graph;
mod hypercube;
mod self_avoiding;

pub use graph::Graph;
pub use hypercube::{HypercubeWalk, WalkStep, plan_hypercube_walk};
pub use self_avoiding::{GraphWalk, plan_self_avoiding_walk};

use crate::backend::{Backend, ExecuteOptions};
use crate::circuits::Circuit;
use crate::core::constants::walk::{LENGTH, PAIR_PROBABILITY, ROTATION, SAMPLES, SHOTS};
use crate::core::{Bitstring, Distribution, QreativeError};
use crate::validation;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance on the normalization of a hypercube table.
const TABLE_TOLERANCE: f64 = 1e-9;

/// The space a walk explores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Structure {
    /// All bitstrings of the graph's qubits; couplings are used for pair flips.
    Hypercube(Graph),
    /// The nodes of the graph itself.
    Graph(Graph),
}

impl Structure {
    pub fn kind(&self) -> WalkKind {
        match self {
            Structure::Hypercube(_) => WalkKind::Hypercube,
            Structure::Graph(_) => WalkKind::Graph,
        }
    }

    pub fn graph(&self) -> &Graph {
        match self {
            Structure::Hypercube(graph) | Structure::Graph(graph) => graph,
        }
    }

    /// Number of qubits (and of bits per state, or of nodes).
    pub fn num_qubits(&self) -> usize {
        self.graph().len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkKind {
    Hypercube,
    Graph,
}

impl fmt::Display for WalkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkKind::Hypercube => write!(f, "hypercube"),
            WalkKind::Graph => write!(f, "graph"),
        }
    }
}

/// Parameters of a generation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkConfig {
    /// Steps (hypercube) or moves (graph) per walk.
    pub length: usize,
    /// Independent walks to generate.
    pub samples: usize,
    /// Shots per circuit.
    pub shots: usize,
    /// Chance a hypercube step is a correlated pair flip.
    pub pair_probability: f64,
    /// Rotation angle of every partial flip.
    pub rotation: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self { length: LENGTH, samples: SAMPLES, shots: SHOTS, pair_probability: PAIR_PROBABILITY, rotation: ROTATION }
    }
}

/// Generated statistics: one start and `length + 1` tables per sample.
///
/// `tables[s][k]` is the table of sample `s` after `k` steps of its walk.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkData {
    pub kind: WalkKind,
    pub starts: Vec<String>,
    pub tables: Vec<Vec<Distribution>>,
}

impl WalkData {
    pub fn samples(&self) -> usize {
        self.tables.len()
    }

    /// Walk length; the number of tables per sample minus one.
    pub fn length(&self) -> usize {
        self.tables.first().map_or(0, |steps| steps.len().saturating_sub(1))
    }

    /// The start of a hypercube sample as a bitstring.
    pub fn start_bitstring(&self, sample: usize) -> Result<Bitstring, QreativeError> {
        let start = self.starts.get(sample).ok_or_else(|| QreativeError::InvalidState {
            message: format!("Sample {} not found; {} samples were generated", sample, self.samples()),
        })?;
        Bitstring::new(start)
    }
}

enum Planned {
    Hypercube(HypercubeWalk),
    Graph(GraphWalk),
}

impl Planned {
    fn start_label(&self) -> String {
        match self {
            Planned::Hypercube(walk) => walk.start.to_string(),
            Planned::Graph(walk) => walk.start().to_string(),
        }
    }

    fn circuit(&self, num_qubits: usize, prefix: usize, rotation: f64) -> Result<Circuit, QreativeError> {
        match self {
            Planned::Hypercube(walk) => walk.circuit(prefix, rotation),
            Planned::Graph(walk) => walk.circuit(num_qubits, prefix, rotation),
        }
    }
}

fn check_structure(structure: &Structure, length: usize) -> Result<(), QreativeError> {
    let graph = structure.graph();
    if graph.is_empty() {
        return Err(QreativeError::InvalidStructure { message: "A walk needs at least one node".to_string() });
    }
    if let Structure::Graph(_) = structure {
        if length > 0 {
            if let Some(isolated) = (0..graph.len()).find(|node| graph.neighbours(*node).is_empty()) {
                return Err(QreativeError::InvalidStructure {
                    message: format!("Node {} has no neighbours, so a graph walk could get stuck", isolated),
                });
            }
        }
    }
    Ok(())
}

fn plan<R: Rng + ?Sized>(
    structure: &Structure,
    config: &WalkConfig,
    start: Option<&str>,
    rng: &mut R,
) -> Result<Planned, QreativeError> {
    let n = structure.num_qubits();
    match structure {
        Structure::Hypercube(graph) => {
            let start = match start {
                Some(s) => Bitstring::new(s)?,
                None => Bitstring::random(n, rng),
            };
            plan_hypercube_walk(graph, start, config.length, config.pair_probability, rng).map(Planned::Hypercube)
        }
        Structure::Graph(graph) => {
            let start = match start {
                Some(s) => s.trim().parse::<usize>().map_err(|_| QreativeError::InvalidState {
                    message: format!("Start '{}' is not a node index", s),
                })?,
                None => rng.random_range(0..n),
            };
            plan_self_avoiding_walk(graph, start, config.length, rng).map(Planned::Graph)
        }
    }
}

/// Generates `config.samples` walks of `config.length` steps on `structure`.
///
/// When `start` is given every sample begins there; otherwise each sample gets
/// a uniformly random start. All circuits are executed as a single batch.
///
/// # Errors
/// * `InvalidStructure` / `InvalidState` for an unusable structure or start.
/// * Any error of the backend, unchanged.
pub fn generate<R: Rng + ?Sized>(
    backend: &mut dyn Backend,
    structure: &Structure,
    config: &WalkConfig,
    start: Option<&str>,
    rng: &mut R,
) -> Result<WalkData, QreativeError> {
    check_structure(structure, config.length)?;
    let n = structure.num_qubits();
    let kind = structure.kind();
    info!(
        "generating {} {} walk(s) of length {} on {} qubits with the {} backend",
        config.samples,
        kind,
        config.length,
        n,
        backend.name()
    );

    let mut walks = Vec::with_capacity(config.samples);
    for _ in 0..config.samples {
        walks.push(plan(structure, config, start, rng)?);
    }

    let mut batch = Vec::with_capacity(config.samples * (config.length + 1));
    for walk in &walks {
        for prefix in 0..=config.length {
            batch.push(walk.circuit(n, prefix, config.rotation)?);
        }
    }
    debug!("submitting a batch of {} circuits", batch.len());
    let result = backend.execute(&batch, &ExecuteOptions::shots(config.shots))?;
    if result.len() != batch.len() {
        return Err(QreativeError::Backend {
            message: format!("Backend returned {} results for {} circuits", result.len(), batch.len()),
        });
    }

    let mut results = result.all_counts().iter();
    let mut tables = Vec::with_capacity(walks.len());
    for _ in &walks {
        let mut steps = Vec::with_capacity(config.length + 1);
        for counts in results.by_ref().take(config.length + 1) {
            let table = match kind {
                WalkKind::Hypercube => {
                    let table = counts.to_distribution();
                    validation::validate_hypercube_table(&table, n, Some(TABLE_TOLERANCE))?;
                    table
                }
                WalkKind::Graph => {
                    let table = counts.qubit_marginals(n);
                    validation::check_probabilities(&table)?;
                    validation::check_node_labels(&table, Some(n))?;
                    table
                }
            };
            steps.push(table);
        }
        tables.push(steps);
    }

    let starts = walks.iter().map(Planned::start_label).collect();
    Ok(WalkData { kind, starts, tables })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ClassicalBackend, StateVectorBackend};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(length: usize, samples: usize) -> WalkConfig {
        WalkConfig { length, samples, shots: 256, ..WalkConfig::default() }
    }

    #[test]
    fn hypercube_tables_cover_every_prefix() -> Result<(), QreativeError> {
        let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(1));
        let mut rng = StdRng::seed_from_u64(2);
        let structure = Structure::Hypercube(Graph::device("ibmqx4")?);
        let data = generate(&mut backend, &structure, &config(4, 2), None, &mut rng)?;
        assert_eq!(data.kind, WalkKind::Hypercube);
        assert_eq!(data.samples(), 2);
        assert_eq!(data.length(), 4);
        for (start, steps) in data.starts.iter().zip(&data.tables) {
            // nothing has moved yet at step zero
            assert_eq!(steps[0].probability(start), 1.0);
        }
        Ok(())
    }

    #[test]
    fn supplied_start_is_shared() -> Result<(), QreativeError> {
        let mut backend = ClassicalBackend::new(StdRng::seed_from_u64(3));
        let mut rng = StdRng::seed_from_u64(4);
        let structure = Structure::Hypercube(Graph::all_to_all(3));
        let data = generate(&mut backend, &structure, &config(2, 3), Some("101"), &mut rng)?;
        assert!(data.starts.iter().all(|s| s == "101"));
        assert_eq!(data.start_bitstring(2)?.as_str(), "101");
        assert!(data.start_bitstring(3).is_err());
        Ok(())
    }

    #[test]
    fn bad_start_is_rejected() -> Result<(), QreativeError> {
        let mut backend = ClassicalBackend::new(StdRng::seed_from_u64(3));
        let mut rng = StdRng::seed_from_u64(4);
        let cube = Structure::Hypercube(Graph::all_to_all(3));
        assert!(generate(&mut backend, &cube, &config(2, 1), Some("10"), &mut rng).is_err());
        let graph = Structure::Graph(Graph::grid(2, 2));
        assert!(generate(&mut backend, &graph, &config(2, 1), Some("7"), &mut rng).is_err());
        assert!(generate(&mut backend, &graph, &config(2, 1), Some("x"), &mut rng).is_err());
        Ok(())
    }

    #[test]
    fn graph_tables_list_every_node() -> Result<(), QreativeError> {
        let mut backend = StateVectorBackend::new(StdRng::seed_from_u64(5));
        let mut rng = StdRng::seed_from_u64(6);
        let structure = Structure::Graph(Graph::grid(3, 2));
        let data = generate(&mut backend, &structure, &config(3, 1), Some("0"), &mut rng)?;
        assert_eq!(data.kind, WalkKind::Graph);
        for table in &data.tables[0] {
            assert_eq!(table.len(), 6);
        }
        assert_eq!(data.tables[0][0].probability("0"), 1.0);
        Ok(())
    }

    #[test]
    fn isolated_nodes_stop_graph_walks() {
        let mut backend = ClassicalBackend::new(StdRng::seed_from_u64(3));
        let mut rng = StdRng::seed_from_u64(4);
        let structure = Structure::Graph(Graph::new(3));
        assert!(generate(&mut backend, &structure, &config(1, 1), None, &mut rng).is_err());
        let empty = Structure::Hypercube(Graph::new(0));
        assert!(generate(&mut backend, &empty, &config(1, 1), None, &mut rng).is_err());
    }
}
