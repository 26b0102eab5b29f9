//! Error types for the persistence layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing collections.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record not found in its collection.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Failed to read a file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection contains data that does not deserialize.
    #[error("malformed data in collection '{collection}': {source}")]
    Malformed {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization failure.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An import document failed validation; nothing was applied.
    #[error("invalid settings file: {0}")]
    InvalidImport(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
