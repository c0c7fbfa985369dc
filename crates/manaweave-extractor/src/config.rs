//! Configuration for the FeatureExtractor

use serde::{Deserialize, Serialize};

/// Configuration for the FeatureExtractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Extract noun phrases and named entities
    pub extract_phrases: bool,

    /// Keep the word tokens of the text in the feature set
    pub include_raw_tokens: bool,

    /// Maximum oracle text length (characters); longer text is truncated
    pub max_text_length: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration: phrases on, raw tokens off
    fn default() -> Self {
        Self {
            extract_phrases: true,
            include_raw_tokens: false,
            max_text_length: 10_000,
        }
    }
}

impl ExtractorConfig {
    /// Minimal preset: only the features the scorer uses
    pub fn minimal() -> Self {
        Self {
            extract_phrases: false,
            include_raw_tokens: false,
            ..Self::default()
        }
    }

    /// Verbose preset: every auxiliary feature
    pub fn verbose() -> Self {
        Self {
            extract_phrases: true,
            include_raw_tokens: true,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
