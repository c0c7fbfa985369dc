//! Error types for batch computation

use crate::BatchStats;
use thiserror::Error;

/// Errors that can occur during batch computation
#[derive(Error, Debug)]
pub enum BatchError {
    /// Storage layer error outside a commit
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A commit batch failed and was rolled back
    ///
    /// Batches committed before the failure remain stored; `stats`
    /// describes the run up to the failed batch.
    #[error("Batch commit failed: {message}")]
    Commit {
        /// Statistics at the time of failure
        stats: BatchStats,
        /// Store error message
        message: String,
    },

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
