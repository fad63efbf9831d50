//! Error types for a synchronization run.
//!
//! Every variant is fatal: the run stops and the binary exits non-zero.
//! Tolerated conditions (missing settings row, failed image download,
//! unsupported block kinds) are logged where they happen and never reach
//! this type.

use folio_notion::NotionError;
use folio_persistence::PersistenceError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SyncError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configured project database could not be retrieved or queried.
    #[error("fetch failed for database {database}: {source}")]
    Database {
        database: String,
        #[source]
        source: NotionError,
    },

    /// A project's block tree could not be fetched.
    #[error("fetch failed for document {document}: {source}")]
    Content {
        document: String,
        #[source]
        source: NotionError,
    },

    /// The settings database could not be retrieved or queried.
    #[error("site database {database} unavailable: {source}")]
    Site {
        database: String,
        #[source]
        source: NotionError,
    },

    /// Output could not be written.
    #[error("output error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for synchronization.
pub type Result<T> = std::result::Result<T, SyncError>;
