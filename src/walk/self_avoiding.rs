// src/walk/self_avoiding.rs

//! Self-avoiding walks along the edges of a connectivity graph.

use super::graph::Graph;
use crate::circuits::Circuit;
use crate::core::QreativeError;
use crate::operations::Gate;
use rand::Rng;
use rand::seq::IndexedRandom;

/// The nodes visited by one walk; `path[0]` is the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphWalk {
    path: Vec<usize>,
}

impl GraphWalk {
    pub fn start(&self) -> usize {
        self.path[0]
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Number of moves (one less than the number of visited nodes).
    pub fn len(&self) -> usize {
        self.path.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The diffusion circuit for the first `prefix` moves: the start node is
    /// activated, then each move partially flips the node it leaves and copies
    /// it onto the node it enters.
    pub fn circuit(&self, num_nodes: usize, prefix: usize, rotation: f64) -> Result<Circuit, QreativeError> {
        if prefix > self.len() {
            return Err(QreativeError::InvalidStructure {
                message: format!("Prefix {} is longer than the walk ({} moves)", prefix, self.len()),
            });
        }
        let mut circuit = Circuit::new(num_nodes);
        circuit.add_gate(Gate::X { target: self.start() })?;
        for hop in self.path[..=prefix].windows(2) {
            let (from, to) = (hop[0], hop[1]);
            circuit.add_gate(Gate::Rx { target: from, theta: rotation })?;
            if from != to {
                circuit.add_gate(Gate::Cx { control: from, target: to })?;
            }
        }
        Ok(circuit)
    }
}

/// Plans a walk of `length` moves from `start`.
///
/// Every move picks uniformly among the unvisited neighbours of the current
/// node, or among all of its neighbours once they have all been visited.
///
/// # Errors
/// `InvalidStructure` if `start` is not a node, or the walk reaches a node with
/// no neighbours before completing `length` moves.
pub fn plan_self_avoiding_walk<R: Rng + ?Sized>(
    graph: &Graph,
    start: usize,
    length: usize,
    rng: &mut R,
) -> Result<GraphWalk, QreativeError> {
    if start >= graph.len() {
        return Err(QreativeError::InvalidStructure {
            message: format!("Start node {} is outside a graph of {} nodes", start, graph.len()),
        });
    }
    let mut visited = vec![false; graph.len()];
    visited[start] = true;
    let mut path = Vec::with_capacity(length + 1);
    path.push(start);
    let mut current = start;

    for _ in 0..length {
        let neighbours = graph.neighbours(current);
        let unvisited: Vec<usize> = neighbours.iter().copied().filter(|m| !visited[*m]).collect();
        let next = match unvisited.choose(rng) {
            Some(m) => *m,
            None => *neighbours.choose(rng).ok_or_else(|| QreativeError::InvalidStructure {
                message: format!("Node {} has no neighbours to walk to", current),
            })?,
        };
        visited[next] = true;
        path.push(next);
        current = next;
    }
    Ok(GraphWalk { path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn path_on_a_line_never_turns_back_early() -> Result<(), QreativeError> {
        let graph = Graph::grid(6, 1);
        let mut rng = StdRng::seed_from_u64(4);
        let walk = plan_self_avoiding_walk(&graph, 0, 5, &mut rng)?;
        assert_eq!(walk.path(), &[0, 1, 2, 3, 4, 5]);
        Ok(())
    }

    #[test]
    fn trapped_walk_revisits_instead_of_failing() -> Result<(), QreativeError> {
        let graph = Graph::grid(2, 1);
        let mut rng = StdRng::seed_from_u64(4);
        let walk = plan_self_avoiding_walk(&graph, 0, 4, &mut rng)?;
        assert_eq!(walk.path(), &[0, 1, 0, 1, 0]);
        Ok(())
    }

    #[test]
    fn isolated_start_cannot_move() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(plan_self_avoiding_walk(&Graph::new(3), 1, 1, &mut rng).is_err());
        assert!(plan_self_avoiding_walk(&Graph::new(3), 1, 0, &mut rng).is_ok());
        assert!(plan_self_avoiding_walk(&Graph::new(3), 3, 0, &mut rng).is_err());
    }

    #[test]
    fn prefix_circuits_share_the_path() -> Result<(), QreativeError> {
        let graph = Graph::grid(4, 1);
        let mut rng = StdRng::seed_from_u64(8);
        let walk = plan_self_avoiding_walk(&graph, 0, 3, &mut rng)?;
        let short = walk.circuit(4, 1, 0.3)?;
        let long = walk.circuit(4, 2, 0.3)?;
        assert_eq!(&long.gates()[..short.len()], short.gates());
        Ok(())
    }
}
