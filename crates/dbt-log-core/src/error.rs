//! Error taxonomy for dbt log analysis.
//!
//! Only file access and configuration problems are errors. A line that fails
//! one of the field extractions is not an error: the field is simply `None`.

use std::path::PathBuf;

/// Errors produced while reading, analysing or writing a dbt console log.
#[derive(Debug, thiserror::Error)]
pub enum DbtLogError {
    #[error("failed to read log file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write cleaned log {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("top-n must be at least 1, got {0}")]
    InvalidTopN(usize),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for dbt log operations.
pub type Result<T> = std::result::Result<T, DbtLogError>;
