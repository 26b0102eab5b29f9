//! Error types for production state operations.

use printforge_store::StoreError;
use thiserror::Error;

/// Errors that can occur while mutating production state.
#[derive(Error, Debug)]
pub enum ProductionError {
    /// Production job not found.
    #[error("production job not found: {0}")]
    JobNotFound(String),

    /// Batch item index outside the list.
    #[error("batch index out of range: {0}")]
    BatchIndexOutOfRange(usize),

    /// Persistence error.
    #[error("persistence error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for production operations.
pub type Result<T> = std::result::Result<T, ProductionError>;
