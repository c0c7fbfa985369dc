//! Default parameters for the graph reports

use crate::{AnchorQuery, ClusterQuery, CoreQuery, HubQuery};
use serde::{Deserialize, Serialize};

/// Default queries for each report, loadable from a `[graph]` table
///
/// # Examples
///
/// ```
/// use manaweave_graph::GraphConfig;
///
/// let config = GraphConfig::from_toml("[clusters]\nmin_score = 25.0").unwrap();
/// assert_eq!(config.clusters.min_score, 25.0);
/// assert_eq!(config.clusters.min_size, 3);
/// assert_eq!(config.hubs.min_edges, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Cluster search
    pub clusters: ClusterQuery,
    /// Hub detection
    pub hubs: HubQuery,
    /// Deck-core discovery
    pub cores: CoreQuery,
    /// Strategy anchors
    pub anchors: AnchorQuery,
}

fn check_score(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{} must be a non-negative number, got {}", name, value))
    }
}

fn check_count(name: &str, value: usize) -> Result<(), String> {
    if value == 0 {
        Err(format!("{} must be at least 1", name))
    } else {
        Ok(())
    }
}

impl GraphConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        check_score("clusters.min_score", self.clusters.min_score)?;
        check_count("clusters.min_size", self.clusters.min_size)?;
        check_score("hubs.min_score", self.hubs.min_score)?;
        check_score("hubs.tribal_floor", self.hubs.tribal_floor)?;
        check_score("hubs.combo_floor", self.hubs.combo_floor)?;
        check_score("cores.min_score", self.cores.min_score)?;
        check_count("cores.min_size", self.cores.min_size)?;
        check_score("anchors.min_score", self.anchors.min_score)?;
        check_count("anchors.edge_limit", self.anchors.edge_limit)?;
        check_count("anchors.limit", self.anchors.limit)?;
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
