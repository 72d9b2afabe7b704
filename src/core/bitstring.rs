// src/core/bitstring.rs

use super::error::QreativeError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point in the n-dimensional hypercube of universes.
///
/// Character `m` of the string is qubit `m` and is toggled by portal `m + 1`
/// in the game. Values are immutable; every "mutation" returns a new string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bitstring {
    bits: String,
}

impl Bitstring {
    /// Parses a string of `'0'`/`'1'` characters.
    pub fn new(bits: &str) -> Result<Self, QreativeError> {
        if bits.is_empty() {
            return Err(QreativeError::InvalidState { message: "Bitstring cannot be empty".to_string() });
        }
        if let Some(bad) = bits.chars().find(|c| *c != '0' && *c != '1') {
            return Err(QreativeError::InvalidState {
                message: format!("Bitstring '{}' contains non-binary character '{}'", bits, bad),
            });
        }
        Ok(Self { bits: bits.to_string() })
    }

    /// The all-zero string of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self { bits: "0".repeat(n) }
    }

    /// Draws each bit from a fair coin.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let bits = (0..n).map(|_| if rng.random_bool(0.5) { '1' } else { '0' }).collect();
        Self { bits }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false for a successfully constructed bitstring.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.bits
    }

    /// Value of bit `m`; `None` past the end.
    pub fn bit(&self, m: usize) -> Option<bool> {
        self.bits.as_bytes().get(m).map(|b| *b == b'1')
    }

    /// Iterates over the bits from position 0.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.bytes().map(|b| b == b'1')
    }

    /// Returns the neighbour reached by toggling bit `m`.
    pub fn flip(&self, m: usize) -> Result<Self, QreativeError> {
        if m >= self.len() {
            return Err(QreativeError::InvalidState {
                message: format!("Cannot flip bit {} of the {}-bit string '{}'", m, self.len(), self.bits),
            });
        }
        let bits = self
            .bits
            .char_indices()
            .map(|(i, c)| match (i == m, c) {
                (true, '0') => '1',
                (true, _) => '0',
                (false, c) => c,
            })
            .collect();
        Ok(Self { bits })
    }

    /// All `n` strings one flip away, ordered by the flipped position.
    pub fn neighbours(&self) -> Vec<Self> {
        (0..self.len()).filter_map(|m| self.flip(m).ok()).collect()
    }

    /// Number of positions at which the two strings disagree.
    /// Strings of different lengths also count the overhang.
    pub fn hamming_distance(&self, other: &Bitstring) -> usize {
        let overlap = self.bits.bytes().zip(other.bits.bytes()).filter(|(a, b)| a != b).count();
        overlap + self.len().abs_diff(other.len())
    }

    /// Zero-based positions at which the strings disagree.
    pub fn differing_positions(&self, other: &Bitstring) -> Vec<usize> {
        self.bits
            .bytes()
            .zip(other.bits.bytes())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect()
    }

    /// Resamples a uniformly random string until it is at least `min_distance` away from `self`.
    pub fn random_distant<R: Rng + ?Sized>(&self, min_distance: usize, rng: &mut R) -> Result<Self, QreativeError> {
        if min_distance > self.len() {
            return Err(QreativeError::InvalidState {
                message: format!(
                    "No {}-bit string can be {} flips away from '{}'",
                    self.len(),
                    min_distance,
                    self.bits
                ),
            });
        }
        loop {
            let candidate = Self::random(self.len(), rng);
            if candidate.hamming_distance(self) >= min_distance {
                return Ok(candidate);
            }
        }
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}

impl AsRef<str> for Bitstring {
    fn as_ref(&self) -> &str {
        &self.bits
    }
}

impl FromStr for Bitstring {
    type Err = QreativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Bitstring {
    type Error = QreativeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Bitstring> for String {
    fn from(value: Bitstring) -> Self {
        value.bits
    }
}
