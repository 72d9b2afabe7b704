// src/cache.rs

//! Flat-file cache of generated walk statistics.
//!
//! The cache is a pretty-printed JSON record:
//!
//! ```json
//! {
//!   "version": 1,
//!   "kind": "hypercube",
//!   "starts": ["01101"],
//!   "tables": [[{"01101": 1.0}, {"01101": 0.85, "01111": 0.15}]]
//! }
//! ```
//!
//! `starts` may be omitted; each start is then taken to be the most likely
//! state of its sample's first table. Files are checked against the schema on
//! load, so a malformed cache is reported instead of half-used.

use crate::core::{Bitstring, Distribution, QreativeError};
use crate::validation;
use crate::walk::{WalkData, WalkKind};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Format version written by this crate.
pub const CACHE_VERSION: u32 = 1;

/// How far a cached hypercube table may sum above 1.
const CACHE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    kind: WalkKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    starts: Option<Vec<String>>,
    tables: Vec<Vec<Distribution>>,
}

fn schema_error(message: String) -> QreativeError {
    QreativeError::Cache { message }
}

/// Serializes `data` to the cache format.
pub fn to_json(data: &WalkData) -> Result<String, QreativeError> {
    let file = CacheFile {
        version: CACHE_VERSION,
        kind: data.kind,
        starts: Some(data.starts.clone()),
        tables: data.tables.clone(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Parses and checks a cache document.
///
/// # Errors
/// `QreativeError::Cache` when the text is not valid JSON or breaks the schema.
pub fn from_json(text: &str) -> Result<WalkData, QreativeError> {
    let file: CacheFile = serde_json::from_str(text)?;
    if file.version != CACHE_VERSION {
        return Err(schema_error(format!(
            "Unsupported cache version {} (expected {})",
            file.version, CACHE_VERSION
        )));
    }
    check_tables(file.kind, &file.tables)?;

    let starts = match file.starts {
        Some(starts) => {
            if starts.len() != file.tables.len() {
                return Err(schema_error(format!(
                    "Cache lists {} starts for {} samples",
                    starts.len(),
                    file.tables.len()
                )));
            }
            starts
        }
        None => {
            warn!("cache has no starts; using the most likely state of each first table");
            recover_starts(&file.tables)?
        }
    };
    check_starts(file.kind, &starts, &file.tables)?;

    Ok(WalkData { kind: file.kind, starts, tables: file.tables })
}

fn check_tables(kind: WalkKind, tables: &[Vec<Distribution>]) -> Result<(), QreativeError> {
    let steps = tables.first().map(Vec::len).unwrap_or(0);
    if steps == 0 {
        return Err(schema_error("Cache holds no statistics tables".to_string()));
    }
    let width = tables.iter().flatten().flat_map(Distribution::labels).next().map(str::len).unwrap_or(0);
    for (sample, sample_tables) in tables.iter().enumerate() {
        if sample_tables.len() != steps {
            return Err(schema_error(format!(
                "Sample {} has {} tables but sample 0 has {}",
                sample,
                sample_tables.len(),
                steps
            )));
        }
        for (step, table) in sample_tables.iter().enumerate() {
            let checked = match kind {
                WalkKind::Hypercube => validation::validate_stored_hypercube_table(table, width, Some(CACHE_TOLERANCE)),
                WalkKind::Graph => {
                    validation::check_probabilities(table).and_then(|_| validation::check_node_labels(table, None))
                }
            };
            checked.map_err(|e| schema_error(format!("Sample {} step {}: {}", sample, step, e)))?;
        }
    }
    Ok(())
}

fn recover_starts(tables: &[Vec<Distribution>]) -> Result<Vec<String>, QreativeError> {
    tables
        .iter()
        .enumerate()
        .map(|(sample, steps)| {
            steps
                .first()
                .and_then(Distribution::most_likely)
                .map(str::to_string)
                .ok_or_else(|| schema_error(format!("Sample {} has an empty first table", sample)))
        })
        .collect()
}

fn check_starts(kind: WalkKind, starts: &[String], tables: &[Vec<Distribution>]) -> Result<(), QreativeError> {
    for (sample, start) in starts.iter().enumerate() {
        let valid = match kind {
            WalkKind::Hypercube => {
                let width = tables[sample].iter().flat_map(|t| t.labels()).next().map(str::len);
                Bitstring::new(start).is_ok() && width.is_none_or(|n| n == start.len())
            }
            WalkKind::Graph => start.parse::<usize>().is_ok(),
        };
        if !valid {
            return Err(schema_error(format!("Start '{}' of sample {} is not a {} state", start, sample, kind)));
        }
    }
    Ok(())
}

/// Writes `data` to `path`, replacing any previous cache.
pub fn save(path: impl AsRef<Path>, data: &WalkData) -> Result<(), QreativeError> {
    let path = path.as_ref();
    let text = to_json(data)?;
    fs::write(path, text).map_err(|e| QreativeError::Io {
        message: format!("Could not write cache {}: {}", path.display(), e),
    })?;
    info!("saved {} sample(s) of length {} to {}", data.samples(), data.length(), path.display());
    Ok(())
}

/// Reads and checks the cache at `path`.
///
/// # Errors
/// `QreativeError::Cache` when the file is missing, unreadable or malformed.
pub fn load(path: impl AsRef<Path>) -> Result<WalkData, QreativeError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| QreativeError::Cache {
        message: format!("Could not read cache {}: {}", path.display(), e),
    })?;
    let data = from_json(&text).map_err(|e| match e {
        QreativeError::Cache { message } => QreativeError::Cache { message: format!("{}: {}", path.display(), message) },
        other => other,
    })?;
    info!("loaded {} sample(s) of length {} from {}", data.samples(), data.length(), path.display());
    Ok(data)
}
