//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error from rusqlite.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error when creating the database directory.
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table migration failed to apply.
    #[error("Migration failed at version {version}: {reason}")]
    Migration { version: u32, reason: String },

    /// The connection lock was poisoned.
    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Collection '{key}' is not a JSON array")]
    NotACollection { key: String },

    /// The serialized collection is larger than the configured quota.
    #[error("Collection '{key}' is {size} bytes, over the {quota} byte quota")]
    QuotaExceeded { key: String, size: usize, quota: usize },

    /// No path was configured and the home directory is unknown.
    #[error("Could not determine a database path")]
    NoDatabasePath,
}
