//! Error types for the FeatureExtractor

use thiserror::Error;

/// Errors that can occur around extraction
///
/// Extraction itself never fails; these cover decoding the inputs and
/// loading configuration.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Card metadata could not be decoded
    #[error("Invalid card metadata: {0}")]
    InvalidMetadata(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::InvalidMetadata(e.to_string())
    }
}
