// src/backend/mod.rs

//! Executes batches of `qreative::circuits::Circuit` and reports measurement
//! counts.
//!
//! Everything above this module depends only on the count-producing
//! [`Backend::execute`] contract. Which implementation is used is decided once,
//! at program start, from a [`BackendConfig`] handed to [`backend_from_config`].

mod classical;
mod results;
pub(crate) mod engine;

pub use classical::ClassicalBackend;
pub use engine::StateVectorBackend;
pub use results::ExecutionResult;

use crate::circuits::Circuit;
use crate::core::QreativeError;
use crate::core::constants::walk::SHOTS;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::str::FromStr;

/// Per-job execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Number of times each circuit is run and measured.
    pub shots: usize,
    /// Whether per-shot outcomes are kept in the result.
    pub memory: bool,
}

impl ExecuteOptions {
    pub fn shots(shots: usize) -> Self {
        Self { shots, memory: false }
    }

    pub fn with_memory(mut self) -> Self {
        self.memory = true;
        self
    }
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self::shots(SHOTS)
    }
}

/// Anything that can run circuits and report per-circuit counts.
///
/// Calls are blocking and return complete counts for the whole batch.
pub trait Backend {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Runs every circuit `options.shots` times.
    ///
    /// # Errors
    /// `QreativeError::Backend` if a circuit cannot be executed.
    fn execute(&mut self, circuits: &[Circuit], options: &ExecuteOptions) -> Result<ExecutionResult, QreativeError>;
}

/// The backend implementations that can be built locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Exact amplitude simulation.
    #[default]
    StateVector,
    /// Stochastic bit flips without interference.
    Classical,
}

impl FromStr for BackendKind {
    type Err = QreativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "statevector" | "qasm_simulator" | "simulator" => Ok(BackendKind::StateVector),
            "classical" => Ok(BackendKind::Classical),
            other => Err(QreativeError::BackendUnavailable {
                message: format!("No backend named '{}' is available (try 'statevector' or 'classical')", other),
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::StateVector => write!(f, "statevector"),
            BackendKind::Classical => write!(f, "classical"),
        }
    }
}

/// Configuration of circuit execution, built once and passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Which backend to build. `Err` records a requested backend that cannot be built.
    pub kind: Result<BackendKind, QreativeError>,
    /// Shots per circuit.
    pub shots: usize,
    /// Seed for reproducible sampling; fresh OS entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self { kind: Ok(BackendKind::default()), shots: SHOTS, seed: None }
    }
}

impl BackendConfig {
    /// Reads `QREATIVE_BACKEND`, `QREATIVE_SHOTS` and `QREATIVE_SEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from any key lookup. Unset numbers fall back to
    /// the defaults; unparseable ones do too, with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let kind = match lookup("QREATIVE_BACKEND") {
            Some(name) => name.parse(),
            None => defaults.kind,
        };
        let shots = match lookup("QREATIVE_SHOTS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(shots) if shots > 0 => shots,
                _ => {
                    warn!("QREATIVE_SHOTS='{}' is not a positive integer; using {}", raw, defaults.shots);
                    defaults.shots
                }
            },
            None => defaults.shots,
        };
        let seed = match lookup("QREATIVE_SEED") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!("QREATIVE_SEED='{}' is not an unsigned integer; sampling will not be reproducible", raw);
                    None
                }
            },
            None => defaults.seed,
        };
        Self { kind, shots, seed }
    }

    pub fn with_kind(mut self, kind: BackendKind) -> Self {
        self.kind = Ok(kind);
        self
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Builds the backend described by `config`.
///
/// # Errors
/// `BackendUnavailable` when the configuration names a backend that does not
/// exist or asks for zero shots.
pub fn backend_from_config(config: &BackendConfig) -> Result<Box<dyn Backend>, QreativeError> {
    let kind = config.kind.clone()?;
    if config.shots == 0 {
        return Err(QreativeError::BackendUnavailable { message: "A backend needs at least one shot per circuit".to_string() });
    }
    info!("using {} backend with {} shots", kind, config.shots);
    let backend: Box<dyn Backend> = match kind {
        BackendKind::StateVector => Box::new(StateVectorBackend::new(config.rng())),
        BackendKind::Classical => Box::new(ClassicalBackend::new(config.rng())),
    };
    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = BackendConfig::from_lookup(lookup(&[]));
        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.shots, SHOTS);
    }

    #[test]
    fn reads_kind_shots_and_seed() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("QREATIVE_BACKEND", "Classical"),
            ("QREATIVE_SHOTS", "256"),
            ("QREATIVE_SEED", "42"),
        ]));
        assert_eq!(config.kind, Ok(BackendKind::Classical));
        assert_eq!(config.shots, 256);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let config = BackendConfig::from_lookup(lookup(&[("QREATIVE_SHOTS", "lots"), ("QREATIVE_SEED", "-4")]));
        assert_eq!(config.shots, SHOTS);
        assert_eq!(config.seed, None);
        let config = BackendConfig::from_lookup(lookup(&[("QREATIVE_SHOTS", "0"), ("QREATIVE_SEED", " 7 ")]));
        assert_eq!(config.shots, SHOTS);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn unknown_backend_is_unavailable() {
        let config = BackendConfig::from_lookup(lookup(&[("QREATIVE_BACKEND", "ibmqx4")]));
        assert!(matches!(backend_from_config(&config), Err(QreativeError::BackendUnavailable { .. })));
    }

    #[test]
    fn zero_shots_is_rejected() {
        let config = BackendConfig::default().with_shots(0);
        assert!(backend_from_config(&config).is_err());
    }

    #[test]
    fn factory_builds_named_backend() -> Result<(), QreativeError> {
        let config = BackendConfig::default().with_kind(BackendKind::Classical).with_seed(Some(1));
        let backend = backend_from_config(&config)?;
        assert_eq!(backend.name(), "classical");
        Ok(())
    }
}
