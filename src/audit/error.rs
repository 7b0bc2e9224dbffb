//! Error types for the audit pipeline.
//!
//! Only ingestion and schema reconciliation can fail. Timestamp parsing and
//! classification are total: a bad timestamp becomes a null field and is
//! tallied in [`Diagnostics`](crate::audit::report::Diagnostics).

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// A source file could not be read or parsed as a CSV table.
///
/// Recorded per file and skipped; never fatal to the run.
#[derive(Debug, Clone, Error, Serialize)]
#[error("Failed to ingest {}: {reason}", .path.display())]
pub struct IngestionError {
    pub path: PathBuf,
    pub reason: String,
}

impl IngestionError {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Two columns of one table normalize to the same key and disagree.
///
/// Aborts normalization of the affected table only.
#[derive(Debug, Clone, Error, Serialize)]
#[error(
    "Schema conflict in {source_name}: columns '{first}' and '{second}' both map to '{column}' with different values"
)]
pub struct SchemaConflictError {
    pub source_name: String,
    pub column: String,
    pub first: String,
    pub second: String,
}

/// Errors raised while loading classifier and path configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid vocabulary '{list}': {message}")]
    Vocabulary { list: String, message: String },

    #[error("Failed to compile '{list}' matcher: {source}")]
    Pattern {
        list: String,
        #[source]
        source: regex::Error,
    },
}
