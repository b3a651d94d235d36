//! # Store Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading, saving, importing, or exporting.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A document could not be parsed or serialized.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The CSV input is unreadable as a whole (as opposed to a bad row).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
