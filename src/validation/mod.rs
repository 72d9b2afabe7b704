// src/validation/mod.rs

//! Checks applied to statistics tables after generation and after loading.

use crate::core::{Bitstring, Distribution, QreativeError};

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the probabilities of `dist` sum to 1.
///
/// # Arguments
/// * `dist` - The table to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QreativeError::InvalidState)` otherwise.
pub fn check_normalization(dist: &Distribution, tolerance: Option<f64>) -> Result<(), QreativeError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let total = dist.total();
    if (total - 1.0).abs() > effective_tolerance {
        Err(QreativeError::InvalidState {
            message: format!(
                "Probabilities sum to {:.12}, deviating from 1.0 by more than tolerance {:.1e}",
                total, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that the probabilities of `dist` sum to at most 1.
///
/// Stored tables may be short of 1: any state they omit has probability zero.
pub fn check_subnormalized(dist: &Distribution, tolerance: Option<f64>) -> Result<(), QreativeError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let total = dist.total();
    if total > 1.0 + effective_tolerance {
        Err(QreativeError::InvalidState {
            message: format!("Probabilities sum to {:.12}, exceeding 1.0 by more than tolerance {:.1e}", total, effective_tolerance),
        })
    } else {
        Ok(())
    }
}

/// Checks that every probability is finite and lies in `[0, 1]`.
pub fn check_probabilities(dist: &Distribution) -> Result<(), QreativeError> {
    match dist.iter().find(|(_, p)| !p.is_finite() || *p < 0.0 || *p > 1.0) {
        Some((label, p)) => Err(QreativeError::InvalidState {
            message: format!("Probability {} of '{}' is not in [0, 1]", p, label),
        }),
        None => Ok(()),
    }
}

/// Checks that every label is a bitstring of exactly `n` bits.
pub fn check_bitstring_labels(dist: &Distribution, n: usize) -> Result<(), QreativeError> {
    for label in dist.labels() {
        let bits = Bitstring::new(label)?;
        if bits.len() != n {
            return Err(QreativeError::InvalidState {
                message: format!("Label '{}' has {} bits, expected {}", label, bits.len(), n),
            });
        }
    }
    Ok(())
}

/// Checks that every label is a node index below `num_nodes`.
pub fn check_node_labels(dist: &Distribution, num_nodes: Option<usize>) -> Result<(), QreativeError> {
    for label in dist.labels() {
        let node: usize = label.parse().map_err(|_| QreativeError::InvalidState {
            message: format!("Label '{}' is not a node index", label),
        })?;
        if let Some(limit) = num_nodes {
            if node >= limit {
                return Err(QreativeError::InvalidState {
                    message: format!("Node {} is outside a graph of {} nodes", node, limit),
                });
            }
        }
    }
    Ok(())
}

/// Runs the probability and label checks for a hypercube table of dimension `n`.
pub fn validate_hypercube_table(dist: &Distribution, n: usize, tolerance: Option<f64>) -> Result<(), QreativeError> {
    check_probabilities(dist)?;
    check_bitstring_labels(dist, n)?;
    check_normalization(dist, tolerance)
}

/// Range and label checks for a stored hypercube table, which may sum to less than 1.
pub fn validate_stored_hypercube_table(dist: &Distribution, n: usize, tolerance: Option<f64>) -> Result<(), QreativeError> {
    check_probabilities(dist)?;
    check_bitstring_labels(dist, n)?;
    check_subnormalized(dist, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(entries: &[(&str, f64)]) -> Distribution {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn normalized_table_passes() {
        assert!(check_normalization(&dist(&[("00", 0.25), ("11", 0.75)]), None).is_ok());
        assert!(check_normalization(&dist(&[("00", 0.25)]), None).is_err());
        assert!(check_normalization(&dist(&[("00", 0.98)]), Some(0.05)).is_ok());
    }

    #[test]
    fn stored_tables_may_fall_short_of_one() {
        assert!(check_subnormalized(&dist(&[("00", 0.25)]), None).is_ok());
        assert!(check_subnormalized(&Distribution::new(), None).is_ok());
        assert!(check_subnormalized(&dist(&[("00", 0.6), ("01", 0.6)]), None).is_err());
        assert!(validate_stored_hypercube_table(&dist(&[("01", 0.9)]), 2, Some(1e-6)).is_ok());
        assert!(validate_stored_hypercube_table(&dist(&[("01", 0.9)]), 3, Some(1e-6)).is_err());
    }

    #[test]
    fn out_of_range_probability_fails() {
        assert!(check_probabilities(&dist(&[("0", 1.5)])).is_err());
        assert!(check_probabilities(&dist(&[("0", f64::NAN)])).is_err());
        assert!(check_probabilities(&dist(&[("0", 0.5)])).is_ok());
    }

    #[test]
    fn label_checks() {
        assert!(check_bitstring_labels(&dist(&[("010", 1.0)]), 3).is_ok());
        assert!(check_bitstring_labels(&dist(&[("01", 1.0)]), 3).is_err());
        assert!(check_node_labels(&dist(&[("4", 0.3)]), Some(5)).is_ok());
        assert!(check_node_labels(&dist(&[("5", 0.3)]), Some(5)).is_err());
        assert!(check_node_labels(&dist(&[("x", 0.3)]), None).is_err());
    }
}
