//! Error types for graph analysis

use thiserror::Error;

/// Errors that can occur during graph analysis
#[derive(Error, Debug)]
pub enum GraphError {
    /// Storage layer error
    #[error("Storage error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for graph analysis
pub type Result<T> = std::result::Result<T, GraphError>;
