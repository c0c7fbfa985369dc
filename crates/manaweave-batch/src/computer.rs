//! Pairwise synergy computation over a card set

use crate::{BatchConfig, BatchError, BatchStats, CancellationFlag};
use manaweave_domain::traits::SynergyStore;
use manaweave_domain::{CardId, CardPair, FeatureSet, SynergyScore};
use manaweave_scorer::SynergyScorer;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A card taking part in a batch run
///
/// `features` is `None` for a card that was never analyzed; its pairs are
/// counted as errors and skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedCard {
    /// Card id
    pub id: CardId,
    /// Extracted features, if available
    pub features: Option<FeatureSet>,
}

impl AnalyzedCard {
    /// A card with features
    pub fn new(id: CardId, features: FeatureSet) -> Self {
        Self {
            id,
            features: Some(features),
        }
    }

    /// A card without features
    pub fn missing(id: CardId) -> Self {
        Self { id, features: None }
    }
}

impl From<(CardId, FeatureSet)> for AnalyzedCard {
    fn from((id, features): (CardId, FeatureSet)) -> Self {
        Self::new(id, features)
    }
}

/// Pair waiting to be scored in the current batch
struct PendingPair<'a> {
    pair: CardPair,
    a: &'a FeatureSet,
    b: &'a FeatureSet,
}

/// Scores every unordered pair of a card set and persists the results
///
/// The run is idempotent: unless `recompute` is set, pairs with a stored
/// edge are skipped, so an interrupted run resumes where it stopped.
/// Pairs are scored in commit batches of `batch_size`; each batch is
/// written with one [`SynergyStore::put_batch`] call.
///
/// # Examples
///
/// ```
/// use manaweave_batch::{AnalyzedCard, BatchConfig, CancellationFlag, SynergyComputer};
/// use manaweave_domain::{CardId, FeatureSet};
/// use manaweave_scorer::SynergyScorer;
/// use manaweave_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteStore::new(":memory:")?;
/// let computer = SynergyComputer::new(BatchConfig::default(), SynergyScorer::default())?;
///
/// let cards = vec![
///     AnalyzedCard::new(CardId::from_value(1), FeatureSet::default()),
///     AnalyzedCard::new(CardId::from_value(2), FeatureSet::default()),
/// ];
/// let stats = computer.run(&cards, &mut store, &CancellationFlag::new(), |_| {})?;
/// assert_eq!(stats.computed, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SynergyComputer {
    config: BatchConfig,
    scorer: SynergyScorer,
}

impl SynergyComputer {
    /// Create a computer, rejecting an invalid configuration
    pub fn new(config: BatchConfig, scorer: SynergyScorer) -> Result<Self, BatchError> {
        config.validate().map_err(BatchError::Config)?;
        Ok(Self { config, scorer })
    }

    /// Create a computer with default configuration and scorer
    pub fn default_config() -> Self {
        Self {
            config: BatchConfig::default(),
            scorer: SynergyScorer::default(),
        }
    }

    /// Get the batch configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Get the scorer
    pub fn scorer(&self) -> &SynergyScorer {
        &self.scorer
    }

    /// Compute and store synergies for every unordered pair of `cards`
    ///
    /// Pairs are enumerated in input order. A pair repeated because an id
    /// occurs more than once in `cards` is scored once; the repeats count
    /// as errors. `cancel` is checked before each
    /// pair; on cancellation the pending batch is committed and the stats
    /// are returned with `cancelled` set. `on_progress` is called after
    /// every `progress_every_batches` committed batches and once at the end.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Commit`] if a batch fails to commit. That
    /// batch is rolled back by the store; earlier batches stay committed.
    pub fn run<S, F>(
        &self,
        cards: &[AnalyzedCard],
        store: &mut S,
        cancel: &CancellationFlag,
        mut on_progress: F,
    ) -> Result<BatchStats, BatchError>
    where
        S: SynergyStore,
        S::Error: Display,
        F: FnMut(&BatchStats),
    {
        let start = Instant::now();
        let mut stats = BatchStats::for_cards(cards.len());
        let mut pending: Vec<PendingPair<'_>> = Vec::with_capacity(self.config.batch_size);
        let mut queued: BTreeSet<CardPair> = BTreeSet::new();

        info!(
            "Computing synergies for {} cards ({} pairs, batch size {}, min score {})",
            cards.len(),
            stats.total_pairs,
            self.config.batch_size,
            self.config.min_score
        );

        'pairs: for (i, first) in cards.iter().enumerate() {
            for second in &cards[i + 1..] {
                if cancel.is_cancelled() {
                    info!("Cancellation requested after {} pairs", stats.processed);
                    stats.cancelled = true;
                    break 'pairs;
                }
                stats.processed += 1;

                if let Some(next) = self.admit(first, second, store, &mut queued, &mut stats) {
                    pending.push(next);
                }

                if pending.len() >= self.config.batch_size {
                    self.commit(&mut pending, store, &mut stats, start)?;
                    if stats.batches % self.config.progress_every_batches == 0 {
                        on_progress(&stats);
                    }
                }
            }
        }

        if !pending.is_empty() {
            self.commit(&mut pending, store, &mut stats, start)?;
        }

        stats.record_runtime(start.elapsed());
        on_progress(&stats);

        info!(
            "Synergy computation {}: {} computed, {} stored, {} already stored, {} errors",
            if stats.cancelled { "cancelled" } else { "finished" },
            stats.computed,
            stats.stored,
            stats.skipped_existing,
            stats.errors
        );
        Ok(stats)
    }

    /// Decide whether a pair needs scoring, updating the skip counters
    fn admit<'a, S>(
        &self,
        first: &'a AnalyzedCard,
        second: &'a AnalyzedCard,
        store: &S,
        queued: &mut BTreeSet<CardPair>,
        stats: &mut BatchStats,
    ) -> Option<PendingPair<'a>>
    where
        S: SynergyStore,
        S::Error: Display,
    {
        let Some(pair) = CardPair::new(first.id, second.id) else {
            warn!("Card {} appears twice in the input, skipping self pair", first.id);
            stats.errors += 1;
            return None;
        };

        let (Some(a), Some(b)) = (&first.features, &second.features) else {
            warn!("Skipping pair {}: missing features", pair);
            stats.errors += 1;
            return None;
        };

        if queued.contains(&pair) {
            warn!("Pair {} repeats in the input, skipping", pair);
            stats.errors += 1;
            return None;
        }

        if !self.config.recompute {
            match store.contains(pair.low(), pair.high()) {
                Ok(true) => {
                    stats.skipped_existing += 1;
                    return None;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!("Skipping pair {}: existence check failed: {}", pair, e);
                    stats.errors += 1;
                    return None;
                }
            }
        }

        queued.insert(pair);
        Some(PendingPair { pair, a, b })
    }

    /// Score the pending pairs and write those above the floor
    fn commit<S>(
        &self,
        pending: &mut Vec<PendingPair<'_>>,
        store: &mut S,
        stats: &mut BatchStats,
        start: Instant,
    ) -> Result<(), BatchError>
    where
        S: SynergyStore,
        S::Error: Display,
    {
        let scored = self.score_pending(pending);
        stats.computed += scored.len();
        pending.clear();

        let total = scored.len();
        let keep: Vec<(CardPair, SynergyScore)> = scored
            .into_iter()
            .filter(|(_, score)| score.total >= self.config.min_score)
            .collect();
        let below = total - keep.len();

        if !keep.is_empty() {
            if let Err(e) = store.put_batch(&keep) {
                stats.skipped_low_score += below;
                stats.record_runtime(start.elapsed());
                error!("Batch {} failed, rolled back: {}", stats.batches + 1, e);
                return Err(BatchError::Commit {
                    stats: stats.clone(),
                    message: e.to_string(),
                });
            }
        }

        stats.stored += keep.len();
        stats.skipped_low_score += below;
        stats.batches += 1;
        debug!(
            "Committed batch {}: {} stored, {} below floor ({}/{} pairs)",
            stats.batches,
            keep.len(),
            below,
            stats.processed,
            stats.total_pairs
        );
        Ok(())
    }

    fn score_pending(&self, pending: &[PendingPair<'_>]) -> Vec<(CardPair, SynergyScore)> {
        if self.config.parallel {
            pending
                .par_iter()
                .map(|p| (p.pair, self.scorer.score(p.a, p.b)))
                .collect()
        } else {
            pending
                .iter()
                .map(|p| (p.pair, self.scorer.score(p.a, p.b)))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manaweave_domain::{ScoreField, SynergyEdge};
    use std::collections::BTreeMap;

    // Mock store for testing
    #[derive(Default)]
    struct MockStore {
        edges: BTreeMap<CardPair, SynergyScore>,
        put_batch_calls: usize,
        fail_on_batch: Option<usize>,
        fail_contains: bool,
    }

    impl SynergyStore for MockStore {
        type Error = String;

        fn put(&mut self, x: CardId, y: CardId, score: &SynergyScore) -> Result<(), Self::Error> {
            let pair = CardPair::new(x, y).ok_or("self pair")?;
            self.edges.insert(pair, score.clone());
            Ok(())
        }

        fn put_batch(&mut self, entries: &[(CardPair, SynergyScore)]) -> Result<usize, Self::Error> {
            self.put_batch_calls += 1;
            if self.fail_on_batch == Some(self.put_batch_calls) {
                return Err("disk full".to_string());
            }
            for (pair, score) in entries {
                self.edges.insert(*pair, score.clone());
            }
            Ok(entries.len())
        }

        fn get(&self, x: CardId, y: CardId) -> Result<Option<SynergyScore>, Self::Error> {
            Ok(CardPair::new(x, y).and_then(|p| self.edges.get(&p).cloned()))
        }

        fn contains(&self, x: CardId, y: CardId) -> Result<bool, Self::Error> {
            if self.fail_contains {
                return Err("locked".to_string());
            }
            Ok(CardPair::new(x, y).is_some_and(|p| self.edges.contains_key(&p)))
        }

        fn top_n(&self, _limit: usize, _min_score: f64) -> Result<Vec<SynergyEdge>, Self::Error> {
            Ok(Vec::new())
        }

        fn for_card(&self, _id: CardId, _min_score: f64, _limit: usize) -> Result<Vec<SynergyEdge>, Self::Error> {
            Ok(Vec::new())
        }

        fn filter_by_component(
            &self,
            _field: ScoreField,
            _min_score: f64,
            _limit: usize,
        ) -> Result<Vec<SynergyEdge>, Self::Error> {
            Ok(Vec::new())
        }

        fn edges_at_least(&self, _min_score: f64) -> Result<Vec<SynergyEdge>, Self::Error> {
            Ok(Vec::new())
        }

        fn count(&self) -> Result<usize, Self::Error> {
            Ok(self.edges.len())
        }

        fn count_at_least(&self, field: ScoreField, min_score: f64) -> Result<usize, Self::Error> {
            Ok(self.edges.values().filter(|s| s.get(field) >= min_score).count())
        }

        fn clear(&mut self) -> Result<usize, Self::Error> {
            let removed = self.edges.len();
            self.edges.clear();
            Ok(removed)
        }
    }

    fn red_card(v: i64) -> AnalyzedCard {
        let features = FeatureSet {
            colors: manaweave_domain::ColorSet::from_symbols(["R"]),
            ..Default::default()
        };
        AnalyzedCard::new(CardId::from_value(v), features)
    }

    fn blank_card(v: i64) -> AnalyzedCard {
        AnalyzedCard::new(CardId::from_value(v), FeatureSet::default())
    }

    fn computer(config: BatchConfig) -> SynergyComputer {
        SynergyComputer::new(config, SynergyScorer::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BatchConfig {
            batch_size: 0,
            ..Default::default()
        };
        let result = SynergyComputer::new(config, SynergyScorer::default());
        assert!(matches!(result, Err(BatchError::Config(_))));
    }

    #[test]
    fn test_stores_pairs_above_floor() {
        // Red pairs score 3.0 (exact color match); blank pairs score 0
        let cards = vec![red_card(1), red_card(2), blank_card(3)];
        let mut store = MockStore::default();

        let stats = computer(BatchConfig::default())
            .run(&cards, &mut store, &CancellationFlag::new(), |_| {})
            .unwrap();

        assert_eq!(stats.total_pairs, 3);
        assert_eq!(stats.processed, 3);
        assert_eq!(stats.computed, 3);
        assert_eq!(stats.stored, 1);
        assert_eq!(stats.skipped_low_score, 2);
        assert_eq!(stats.batches, 1);
        assert!(stats.is_complete());
        assert_eq!(store.edges.len(), 1);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let cards: Vec<AnalyzedCard> = (1..=5).map(red_card).collect();
        let mut store = MockStore::default();
        let computer = computer(BatchConfig::default());

        let first = computer.run(&cards, &mut store, &CancellationFlag::new(), |_| {}).unwrap();
        assert_eq!(first.stored, 10);

        let second = computer.run(&cards, &mut store, &CancellationFlag::new(), |_| {}).unwrap();
        assert_eq!(second.stored, 0);
        assert_eq!(second.computed, 0);
        assert_eq!(second.skipped_existing, 10);
        assert_eq!(store.edges.len(), 10);
    }

    #[test]
    fn test_recompute_mode_rescores_existing() {
        let cards: Vec<AnalyzedCard> = (1..=3).map(red_card).collect();
        let mut store = MockStore::default();
        let config = BatchConfig {
            recompute: true,
            ..Default::default()
        };
        let computer = computer(config);

        computer.run(&cards, &mut store, &CancellationFlag::new(), |_| {}).unwrap();
        let again = computer.run(&cards, &mut store, &CancellationFlag::new(), |_| {}).unwrap();

        assert_eq!(again.skipped_existing, 0);
        assert_eq!(again.stored, 3);
        assert_eq!(store.edges.len(), 3);
    }

    #[test]
    fn test_commit_batches_and_progress() {
        let cards: Vec<AnalyzedCard> = (1..=5).map(red_card).collect();
        let mut store = MockStore::default();
        let config = BatchConfig {
            batch_size: 3,
            parallel: false,
            ..Default::default()
        };

        let mut reports = Vec::new();
        let stats = computer(config)
            .run(&cards, &mut store, &CancellationFlag::new(), |s| reports.push(s.processed))
            .unwrap();

        // 10 pairs in batches of 3: 3 + 3 + 3 + 1
        assert_eq!(stats.batches, 4);
        assert_eq!(store.put_batch_calls, 4);
        assert_eq!(reports, vec![3, 6, 9, 10]);
    }

    #[test]
    fn test_missing_features_counted_as_errors() {
        let cards = vec![red_card(1), AnalyzedCard::missing(CardId::from_value(2)), red_card(3)];
        let mut store = MockStore::default();

        let stats = computer(BatchConfig::default())
            .run(&cards, &mut store, &CancellationFlag::new(), |_| {})
            .unwrap();

        assert_eq!(stats.errors, 2);
        assert_eq!(stats.computed, 1);
        assert_eq!(stats.processed, 3);
        assert!(store.edges.contains_key(&CardPair::new(CardId::from_value(1), CardId::from_value(3)).unwrap()));
    }

    #[test]
    fn test_duplicate_card_ids_skipped() {
        let cards = vec![red_card(1), red_card(1)];
        let mut store = MockStore::default();

        let stats = computer(BatchConfig::default())
            .run(&cards, &mut store, &CancellationFlag::new(), |_| {})
            .unwrap();

        assert_eq!(stats.errors, 1);
        assert!(store.edges.is_empty());
    }

    #[test]
    fn test_repeated_id_pairs_stored_once() {
        // Pairs (1,2) and (1,3) each occur twice; batch size keeps them in one batch
        let cards = vec![red_card(1), red_card(2), red_card(1), red_card(3)];
        let mut store = MockStore::default();

        let stats = computer(BatchConfig::default())
            .run(&cards, &mut store, &CancellationFlag::new(), |_| {})
            .unwrap();

        assert_eq!(stats.processed, 6);
        // one self pair and two repeats
        assert_eq!(stats.errors, 3);
        assert_eq!(stats.computed, 3);
        assert_eq!(stats.stored, 3);
        assert_eq!(stats.stored, store.edges.len());
        assert_eq!(store.put_batch_calls, 1);
    }

    #[test]
    fn test_repeated_id_pairs_stored_once_when_recomputing() {
        let cards = vec![red_card(1), red_card(2), red_card(1)];
        let mut store = MockStore::default();
        let config = BatchConfig {
            recompute: true,
            batch_size: 1,
            ..Default::default()
        };

        let stats = computer(config)
            .run(&cards, &mut store, &CancellationFlag::new(), |_| {})
            .unwrap();

        assert_eq!(stats.stored, 1);
        assert_eq!(stats.errors, 2);
        assert_eq!(store.edges.len(), 1);
    }

    #[test]
    fn test_existence_check_failure_counted() {
        let cards: Vec<AnalyzedCard> = (1..=3).map(red_card).collect();
        let mut store = MockStore {
            fail_contains: true,
            ..Default::default()
        };

        let stats = computer(BatchConfig::default())
            .run(&cards, &mut store, &CancellationFlag::new(), |_| {})
            .unwrap();

        assert_eq!(stats.errors, 3);
        assert_eq!(stats.computed, 0);
    }

    #[test]
    fn test_commit_failure_keeps_earlier_batches() {
        let cards: Vec<AnalyzedCard> = (1..=5).map(red_card).collect();
        let mut store = MockStore {
            fail_on_batch: Some(2),
            ..Default::default()
        };
        let config = BatchConfig {
            batch_size: 4,
            ..Default::default()
        };

        let err = computer(config)
            .run(&cards, &mut store, &CancellationFlag::new(), |_| {})
            .unwrap_err();

        match err {
            BatchError::Commit { stats, message } => {
                assert_eq!(stats.batches, 1);
                assert_eq!(stats.stored, 4);
                assert_eq!(message, "disk full");
            }
            other => panic!("expected commit error, got {other}"),
        }
        assert_eq!(store.edges.len(), 4);
    }

    #[test]
    fn test_cancelled_before_start() {
        let cards: Vec<AnalyzedCard> = (1..=4).map(red_card).collect();
        let mut store = MockStore::default();
        let cancel = CancellationFlag::new();
        cancel.cancel();

        let stats = computer(BatchConfig::default())
            .run(&cards, &mut store, &cancel, |_| {})
            .unwrap();

        assert!(stats.cancelled);
        assert_eq!(stats.processed, 0);
        assert!(!stats.is_complete());
        assert!(store.edges.is_empty());
    }

    #[test]
    fn test_cancel_mid_run_commits_pending_and_resumes() {
        let cards: Vec<AnalyzedCard> = (1..=5).map(red_card).collect();
        let mut store = MockStore::default();
        let cancel = CancellationFlag::new();
        let config = BatchConfig {
            batch_size: 2,
            parallel: false,
            ..Default::default()
        };
        let computer = computer(config);

        let handle = cancel.clone();
        let stats = computer
            .run(&cards, &mut store, &cancel, |s| {
                if s.batches == 2 {
                    handle.cancel();
                }
            })
            .unwrap();
        assert!(stats.cancelled);
        assert_eq!(stats.stored, 4);

        cancel.reset();
        let resumed = computer.run(&cards, &mut store, &cancel, |_| {}).unwrap();
        assert_eq!(resumed.skipped_existing, 4);
        assert_eq!(resumed.stored, 6);
        assert_eq!(store.edges.len(), 10);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let cards: Vec<AnalyzedCard> = (1..=6).map(red_card).collect();
        let mut parallel_store = MockStore::default();
        let mut sequential_store = MockStore::default();

        computer(BatchConfig::default())
            .run(&cards, &mut parallel_store, &CancellationFlag::new(), |_| {})
            .unwrap();
        computer(BatchConfig {
            parallel: false,
            ..Default::default()
        })
        .run(&cards, &mut sequential_store, &CancellationFlag::new(), |_| {})
        .unwrap();

        assert_eq!(parallel_store.edges, sequential_store.edges);
    }
}
