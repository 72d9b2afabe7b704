// src/core/stats.rs

//! Measurement counts and the probability tables derived from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome counts of one executed circuit, keyed by measured bitstring.
///
/// Character `q` of every key is the value read from qubit `q`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: BTreeMap<String, usize>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of `outcome`.
    pub fn record(&mut self, outcome: impl Into<String>) {
        *self.counts.entry(outcome.into()).or_insert(0) += 1;
    }

    /// Occurrences of `outcome`; zero when it was never seen.
    pub fn get(&self, outcome: &str) -> usize {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Fraction of shots giving each outcome.
    pub fn to_distribution(&self) -> Distribution {
        let total = self.total();
        if total == 0 {
            return Distribution::new();
        }
        self.counts
            .iter()
            .map(|(k, v)| (k.clone(), *v as f64 / total as f64))
            .collect()
    }

    /// Probability that each of the `num_qubits` qubits reads `1`, keyed by qubit index.
    ///
    /// Every qubit gets an entry, including those that never read `1`.
    pub fn qubit_marginals(&self, num_qubits: usize) -> Distribution {
        let mut marginals = vec![0.0; num_qubits];
        let total = self.total();
        if total > 0 {
            for (outcome, count) in &self.counts {
                let p = *count as f64 / total as f64;
                for (q, bit) in outcome.bytes().take(num_qubits).enumerate() {
                    if bit == b'1' {
                        marginals[q] += p;
                    }
                }
            }
        }
        marginals
            .into_iter()
            .enumerate()
            .map(|(q, p)| (q.to_string(), p))
            .collect()
    }
}

impl FromIterator<(String, usize)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        Self { counts: iter.into_iter().collect() }
    }
}

/// A statistics table: probability of each state label.
///
/// Labels are bitstrings for hypercube walks and decimal node indices for graph
/// walks. A label that is absent has probability exactly zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distribution {
    probabilities: BTreeMap<String, f64>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, probability: f64) {
        self.probabilities.insert(label.into(), probability);
    }

    /// Probability of `label`, or `None` when the table has no entry for it.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.probabilities.get(label).copied()
    }

    /// Probability of `label`, treating a missing entry as zero.
    pub fn probability(&self, label: &str) -> f64 {
        self.get(label).unwrap_or(0.0)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.probabilities.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.probabilities.keys().map(String::as_str)
    }

    /// Entries from most to least likely; equal probabilities keep label order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries
    }

    /// The single most likely label; the lowest label wins a tie.
    pub fn most_likely(&self) -> Option<&str> {
        self.ranked().first().map(|(label, _)| *label)
    }
}

impl FromIterator<(String, f64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self { probabilities: iter.into_iter().collect() }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, p)) in self.iter().enumerate() {
            write!(f, "{}'{}': {:.4}", if i > 0 { ", " } else { "" }, label, p)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, usize)]) -> Counts {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn distribution_divides_by_total_shots() {
        let dist = counts(&[("00", 3), ("11", 1)]).to_distribution();
        assert_eq!(dist.get("00"), Some(0.75));
        assert_eq!(dist.get("11"), Some(0.25));
        assert_eq!(dist.get("01"), None);
        assert_eq!(dist.probability("01"), 0.0);
    }

    #[test]
    fn marginals_cover_every_qubit() {
        let marginals = counts(&[("100", 2), ("110", 2)]).qubit_marginals(3);
        assert_eq!(marginals.len(), 3);
        assert_eq!(marginals.get("0"), Some(1.0));
        assert_eq!(marginals.get("1"), Some(0.5));
        assert_eq!(marginals.get("2"), Some(0.0));
    }

    #[test]
    fn ranking_breaks_ties_by_label() {
        let dist: Distribution = [("b", 0.4), ("a", 0.4), ("c", 0.2)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        assert_eq!(dist.most_likely(), Some("a"));
        let order: Vec<&str> = dist.ranked().into_iter().map(|(k, _)| k).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
