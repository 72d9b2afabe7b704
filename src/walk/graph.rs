// src/walk/graph.rs

//! Qubit connectivity graphs.

use crate::core::QreativeError;
use crate::core::constants::devices;

/// An undirected connectivity graph that also remembers the directed coupling
/// pairs it was built from, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// A graph of `num_nodes` isolated nodes.
    pub fn new(num_nodes: usize) -> Self {
        Self { adjacency: vec![Vec::new(); num_nodes], edges: Vec::new() }
    }

    /// Records the coupling `(a, b)`; adjacency is kept symmetric and free of duplicates.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<(), QreativeError> {
        let n = self.len();
        if a >= n || b >= n || a == b {
            return Err(QreativeError::InvalidStructure {
                message: format!("Edge ({}, {}) is not valid in a graph of {} nodes", a, b, n),
            });
        }
        self.edges.push((a, b));
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
            self.adjacency[b].push(a);
        }
        Ok(())
    }

    pub fn from_edges(num_nodes: usize, edges: &[(usize, usize)]) -> Result<Self, QreativeError> {
        let mut graph = Self::new(num_nodes);
        for (a, b) in edges {
            graph.add_edge(*a, *b)?;
        }
        Ok(graph)
    }

    /// Every ordered pair of distinct nodes is a coupling.
    pub fn all_to_all(num_nodes: usize) -> Self {
        let mut graph = Self::new(num_nodes);
        for a in 0..num_nodes {
            for b in (0..num_nodes).filter(|b| *b != a) {
                graph.edges.push((a, b));
                graph.adjacency[a].push(b);
            }
        }
        graph
    }

    /// An `lx` by `ly` grid; node `x + y * lx` sits at `(x, y)`.
    pub fn grid(lx: usize, ly: usize) -> Self {
        let mut graph = Self::new(lx * ly);
        for y in 0..ly {
            for x in 0..lx {
                let n = x + y * lx;
                if x + 1 < lx {
                    graph.edges.push((n, n + 1));
                    graph.adjacency[n].push(n + 1);
                    graph.adjacency[n + 1].push(n);
                }
                if y + 1 < ly {
                    graph.edges.push((n, n + lx));
                    graph.adjacency[n].push(n + lx);
                    graph.adjacency[n + lx].push(n);
                }
            }
        }
        graph
    }

    /// Builds the graph of a device description: a known device name
    /// (`ibmqx4`, `ibmq_5_tenerife`), a qubit count for all-to-all
    /// connectivity, or `grid:LXxLY`.
    pub fn device(name: &str) -> Result<Self, QreativeError> {
        let name = name.trim();
        if let Some((n, coupling)) = devices::coupling_map(name) {
            return Self::from_edges(n, coupling);
        }
        if let Ok(n) = name.parse::<usize>() {
            if n == 0 {
                return Err(QreativeError::InvalidStructure { message: "A device needs at least one qubit".to_string() });
            }
            return Ok(Self::all_to_all(n));
        }
        if let Some(dims) = name.strip_prefix("grid:") {
            if let Some((lx, ly)) = dims.split_once('x') {
                if let (Ok(lx), Ok(ly)) = (lx.parse::<usize>(), ly.parse::<usize>()) {
                    if lx * ly > 0 {
                        return Ok(Self::grid(lx, ly));
                    }
                }
            }
        }
        Err(QreativeError::InvalidStructure {
            message: format!(
                "Device '{}' not recognized. Use a qubit count, 'grid:LxW', 'ibmqx4' or 'ibmq_5_tenerife'",
                name
            ),
        })
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Nodes adjacent to `node`; empty for an unknown node.
    pub fn neighbours(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Directed coupling pairs in insertion order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}
