//! Error types for output operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing or reading output files.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to create a containing directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize data.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for output operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;
