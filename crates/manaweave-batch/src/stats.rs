//! Progress and outcome counters for a batch run

use manaweave_domain::pair_count;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters collected during a batch run
///
/// Every enumerated pair lands in exactly one of `skipped_existing`,
/// `errors` or `computed`; `processed` is their sum. Computed pairs are
/// either `stored` or `skipped_low_score`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Unordered pairs in the input
    pub total_pairs: usize,

    /// Pairs visited so far
    pub processed: usize,

    /// Pairs skipped because an edge was already stored
    pub skipped_existing: usize,

    /// Pairs scored
    pub computed: usize,

    /// Scored pairs written to the store
    pub stored: usize,

    /// Scored pairs below the storage floor
    pub skipped_low_score: usize,

    /// Pairs skipped because of missing features or store read failures
    pub errors: usize,

    /// Commit batches written
    pub batches: usize,

    /// Whether the run stopped on cancellation
    pub cancelled: bool,

    /// Wall-clock runtime in milliseconds
    pub runtime_ms: u64,
}

impl BatchStats {
    /// Create stats for a run over `cards` cards
    pub fn for_cards(cards: usize) -> Self {
        Self {
            total_pairs: pair_count(cards),
            ..Default::default()
        }
    }

    /// Fraction of pairs visited, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total_pairs == 0 {
            1.0
        } else {
            self.processed as f64 / self.total_pairs as f64
        }
    }

    /// Whether every pair was visited
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.processed == self.total_pairs
    }

    pub(crate) fn record_runtime(&mut self, elapsed: Duration) {
        self.runtime_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Synergy Computation Summary".to_string(),
            "===========================".to_string(),
            format!(
                "Pairs processed: {}/{} ({:.1}%)",
                self.processed,
                self.total_pairs,
                self.progress() * 100.0
            ),
            format!("Computed: {}", self.computed),
            format!("Stored: {}", self.stored),
            format!("Below floor: {}", self.skipped_low_score),
            format!("Already stored: {}", self.skipped_existing),
            format!("Errors: {}", self.errors),
            format!("Batches: {}", self.batches),
            format!("Runtime: {}ms", self.runtime_ms),
        ];
        if self.cancelled {
            lines.push("Cancelled: re-run to resume".to_string());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let mut stats = BatchStats::for_cards(5);
        assert_eq!(stats.progress(), 0.0);
        stats.processed = 5;
        assert_eq!(stats.progress(), 0.5);
        assert!(!stats.is_complete());
        stats.processed = 10;
        assert!(stats.is_complete());

        assert_eq!(BatchStats::for_cards(1).progress(), 1.0);
    }

    #[test]
    fn test_summary_mentions_cancellation() {
        let mut stats = BatchStats::for_cards(3);
        assert!(!stats.summary().contains("Cancelled"));
        stats.cancelled = true;
        assert!(stats.summary().contains("Cancelled"));
    }
}
