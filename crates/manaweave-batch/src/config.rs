//! Configuration for batch computation
//!
//! Controls commit batch size, the storage floor and skip/recompute mode.

use serde::{Deserialize, Serialize};

/// Configuration for the pairwise synergy computation
///
/// # Examples
///
/// ```
/// use manaweave_batch::BatchConfig;
///
/// // Default configuration
/// let config = BatchConfig::default();
/// assert_eq!(config.batch_size, 1000);
/// assert_eq!(config.min_score, 1.0);
///
/// // Small batches, sparse graph
/// let config = BatchConfig::quick();
/// assert_eq!(config.min_score, 5.0);
///
/// // Keep every scored pair
/// let config = BatchConfig::exhaustive();
/// assert_eq!(config.min_score, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Pairs scored per commit batch
    /// Default: 1000
    pub batch_size: usize,

    /// Scores below this total are computed but not stored
    /// Default: 1.0
    pub min_score: f64,

    /// Recompute pairs that already have a stored edge
    /// Default: false (skip existing edges)
    pub recompute: bool,

    /// Score the pairs of a batch on the rayon thread pool
    /// Default: true
    pub parallel: bool,

    /// Report progress every this many committed batches
    /// Default: 1
    pub progress_every_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            min_score: 1.0,
            recompute: false,
            parallel: true,
            progress_every_batches: 1,
        }
    }
}

impl BatchConfig {
    /// Small commit batches and a higher storage floor
    ///
    /// Suitable for interactive runs over a large collection where only
    /// meaningful synergies matter.
    pub fn quick() -> Self {
        Self {
            batch_size: 250,
            min_score: 5.0,
            ..Default::default()
        }
    }

    /// Store every scored pair, in large batches
    pub fn exhaustive() -> Self {
        Self {
            batch_size: 5000,
            min_score: 0.0,
            progress_every_batches: 10,
            ..Default::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(format!(
                "min_score must be a non-negative number, got {}",
                self.min_score
            ));
        }
        if self.progress_every_batches == 0 {
            return Err("progress_every_batches must be at least 1".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BatchConfig::default();
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.min_score, 1.0);
        assert!(!config.recompute);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(BatchConfig::quick().validate().is_ok());
        assert!(BatchConfig::exhaustive().validate().is_ok());
        assert!(BatchConfig::quick().batch_size < BatchConfig::default().batch_size);
        assert!(BatchConfig::exhaustive().min_score < BatchConfig::default().min_score);
    }

    #[test]
    fn test_validation() {
        let config = BatchConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BatchConfig {
            min_score: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BatchConfig {
            min_score: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial() {
        let config = BatchConfig::from_toml("batch_size = 50\nrecompute = true").unwrap();
        assert_eq!(config.batch_size, 50);
        assert!(config.recompute);
        assert_eq!(config.min_score, 1.0);

        let round_trip = BatchConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }
}
