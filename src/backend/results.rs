// src/backend/results.rs
use crate::core::{Counts, QreativeError};
use std::fmt;

/// Holds the outcome of executing a batch of circuits.
/// One `Counts` per circuit, in submission order, plus the per-shot outcomes
/// when memory was requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    counts: Vec<Counts>,
    memory: Option<Vec<Vec<String>>>,
}

impl ExecutionResult {
    /// Creates a result set. (Internal visibility)
    pub(crate) fn new(counts: Vec<Counts>, memory: Option<Vec<Vec<String>>>) -> Self {
        Self { counts, memory }
    }

    /// Counts of the `index`-th circuit of the batch.
    pub fn get_counts(&self, index: usize) -> Result<&Counts, QreativeError> {
        self.counts.get(index).ok_or_else(|| QreativeError::Backend {
            message: format!("No counts for circuit {} of a batch of {}", index, self.counts.len()),
        })
    }

    /// Per-shot outcomes of the `index`-th circuit, in the order they were sampled.
    pub fn get_memory(&self, index: usize) -> Result<&[String], QreativeError> {
        let memory = self.memory.as_ref().ok_or_else(|| QreativeError::Backend {
            message: "Memory was not requested for this execution".to_string(),
        })?;
        memory.get(index).map(Vec::as_slice).ok_or_else(|| QreativeError::Backend {
            message: format!("No memory for circuit {} of a batch of {}", index, memory.len()),
        })
    }

    /// All counts in submission order.
    pub fn all_counts(&self) -> &[Counts] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Execution Results:")?;
        if self.counts.is_empty() {
            writeln!(f, "  No circuits were executed.")?;
        }
        for (i, counts) in self.counts.iter().enumerate() {
            write!(f, "  Circuit {}:", i)?;
            for (outcome, n) in counts.iter() {
                write!(f, " {}={}", outcome, n)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
