//! Error handling logic

use thiserror::Error;

/// Error types raised by walk generation, caching, circuit execution and play.
///
/// Every variant carries a human readable message; lookups of states that are
/// missing from a statistics table are *not* errors and never produce one.
#[derive(Debug, Clone, PartialEq, Eq, Error)] // Eq useful for testing error variants
pub enum QreativeError {
    /// A bitstring or state label is malformed or has the wrong length.
    #[error("Invalid State: {message}")]
    InvalidState {
        /// InvalidState failure message
        message: String,
    },

    /// A connectivity structure or walk configuration cannot support the request.
    #[error("Invalid Structure: {message}")]
    InvalidStructure {
        /// InvalidStructure failure message
        message: String,
    },

    /// A player supplied a direction that is not a number in `[1, n]`.
    #[error("Invalid Direction: '{input}' is not a portal between 1 and {max}")]
    InvalidDirection {
        /// The raw input as typed.
        input: String,
        /// Highest valid direction.
        max: usize,
    },

    /// A move was attempted on a session that already reached a terminal state.
    #[error("Session Over: {message}")]
    SessionOver {
        /// SessionOver failure message
        message: String,
    },

    /// The execution backend rejected a circuit or failed while running it.
    #[error("Backend Error: {message}")]
    Backend {
        /// Backend failure message
        message: String,
    },

    /// No usable execution backend could be built from the configuration.
    #[error("Backend Unavailable: {message}")]
    BackendUnavailable {
        /// BackendUnavailable failure message
        message: String,
    },

    /// The statistics cache is missing, unreadable or fails its schema checks.
    #[error("Cache Error: {message}")]
    Cache {
        /// Cache failure message
        message: String,
    },

    /// Console or filesystem I/O failed.
    #[error("I/O Error: {message}")]
    Io {
        /// Io failure message
        message: String,
    },
}

impl From<std::io::Error> for QreativeError {
    fn from(err: std::io::Error) -> Self {
        QreativeError::Io { message: err.to_string() }
    }
}

impl From<serde_json::Error> for QreativeError {
    fn from(err: serde_json::Error) -> Self {
        QreativeError::Cache { message: err.to_string() }
    }
}
