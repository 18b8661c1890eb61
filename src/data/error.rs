//! Input loading errors.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataError>;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported input format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),

    #[error("invalid CSV header: {0}")]
    Header(#[source] csv::Error),

    #[error("row {row}: {message}")]
    Row { row: usize, message: String },

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
