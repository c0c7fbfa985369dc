//! Graph status report

use manaweave_domain::SynergyEdge;
use serde::Serialize;

/// Totals at or above this are "high"
pub const HIGH_SCORE: f64 = 30.0;
/// Totals at or above this are "good"
pub const GOOD_SCORE: f64 = 15.0;
/// Totals at or above this are "moderate"
pub const MODERATE_SCORE: f64 = 5.0;
/// Tribal, combo or archetype score for a strong edge
pub const STRONG_COMPONENT: f64 = 10.0;
/// Keyword or type score for a supporting edge
pub const SUPPORTING_COMPONENT: f64 = 5.0;

/// Edge counts per total-score band
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    /// Total ≥ 30
    pub high: usize,
    /// 15 ≤ total < 30
    pub good: usize,
    /// 5 ≤ total < 15
    pub moderate: usize,
    /// Total < 5
    pub low: usize,
}

/// Edges with a strong single component
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentCounts {
    /// Tribal ≥ 10
    pub tribal: usize,
    /// Combo ≥ 10
    pub combo: usize,
    /// Archetype ≥ 10
    pub archetype: usize,
    /// Keyword ≥ 5
    pub keyword: usize,
    /// Type ≥ 5
    #[serde(rename = "type")]
    pub type_score: usize,
}

/// Snapshot of the stored synergy graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatus {
    /// Cards in the catalog
    pub total_cards: usize,
    /// Cards with features
    pub analyzed_cards: usize,
    /// Stored edges
    pub total_edges: usize,
    /// Unordered pairs among analyzed cards
    pub expected_pairs: usize,
    /// Stored edges as a percentage of expected pairs
    pub completion_rate: f64,
    /// Edges per total-score band
    pub distribution: ScoreDistribution,
    /// Edges per strong component
    pub components: ComponentCounts,
    /// Highest-scoring edge
    pub top_edge: Option<SynergyEdge>,
}

/// Percentage of `expected` covered by `stored`; 0 when nothing is expected
pub(crate) fn completion_rate(stored: usize, expected: usize) -> f64 {
    if expected == 0 {
        0.0
    } else {
        stored as f64 / expected as f64 * 100.0
    }
}
