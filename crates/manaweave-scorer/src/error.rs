//! Scorer error types

use thiserror::Error;

/// Errors that can occur when building a scorer
///
/// Scoring itself has no error conditions.
#[derive(Error, Debug, PartialEq)]
pub enum ScorerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
