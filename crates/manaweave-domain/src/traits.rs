//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the synergy engine and
//! infrastructure. Implementations live in other crates.

use crate::{CardId, CardPair, CardRecord, FeatureSet, ScoreField, SynergyEdge, SynergyScore};

/// Persistent cache of synergy scores keyed by unordered card pair
///
/// Implementations normalize every `(x, y)` to lower id first before any
/// lookup or write, so argument order never matters. Writing an existing
/// pair replaces the stored score in full.
///
/// Implemented by the infrastructure layer (manaweave-store)
pub trait SynergyStore {
    /// Error type for store operations
    type Error;

    /// Store (or replace) the score for a pair
    fn put(&mut self, x: CardId, y: CardId, score: &SynergyScore) -> Result<(), Self::Error>;

    /// Store many scores in a single transaction
    ///
    /// Either every entry is written or none is. Returns the number of
    /// entries written.
    fn put_batch(&mut self, entries: &[(CardPair, SynergyScore)]) -> Result<usize, Self::Error>;

    /// Get the stored score for a pair
    fn get(&self, x: CardId, y: CardId) -> Result<Option<SynergyScore>, Self::Error>;

    /// Whether a score is stored for a pair
    fn contains(&self, x: CardId, y: CardId) -> Result<bool, Self::Error>;

    /// Highest-scoring edges with total ≥ `min_score`, best first
    fn top_n(&self, limit: usize, min_score: f64) -> Result<Vec<SynergyEdge>, Self::Error>;

    /// Edges touching `id` with total ≥ `min_score`, best first
    fn for_card(&self, id: CardId, min_score: f64, limit: usize)
        -> Result<Vec<SynergyEdge>, Self::Error>;

    /// Edges whose `field` is ≥ `min_score`, ordered by that field descending
    fn filter_by_component(
        &self,
        field: ScoreField,
        min_score: f64,
        limit: usize,
    ) -> Result<Vec<SynergyEdge>, Self::Error>;

    /// Every edge with total ≥ `min_score`, in ascending pair order
    fn edges_at_least(&self, min_score: f64) -> Result<Vec<SynergyEdge>, Self::Error>;

    /// Number of stored edges
    fn count(&self) -> Result<usize, Self::Error>;

    /// Number of stored edges whose `field` is ≥ `min_score`
    fn count_at_least(&self, field: ScoreField, min_score: f64) -> Result<usize, Self::Error>;

    /// Remove every edge, returning how many were removed
    fn clear(&mut self) -> Result<usize, Self::Error>;
}

/// Card collection plus the analysis results cached per card
///
/// Implemented by the infrastructure layer (manaweave-store)
pub trait CardCatalog {
    /// Error type for catalog operations
    type Error;

    /// Insert or replace a card
    fn upsert_card(&mut self, card: &CardRecord) -> Result<(), Self::Error>;

    /// Get a card by id
    fn get_card(&self, id: CardId) -> Result<Option<CardRecord>, Self::Error>;

    /// Cards whose name contains `fragment` (case-insensitive)
    fn find_cards_by_name(&self, fragment: &str, limit: usize)
        -> Result<Vec<CardRecord>, Self::Error>;

    /// Every card, by ascending id
    fn all_cards(&self) -> Result<Vec<CardRecord>, Self::Error>;

    /// Store the feature set for a card, replacing any previous analysis
    fn save_features(&mut self, id: CardId, features: &FeatureSet) -> Result<(), Self::Error>;

    /// Load the stored feature set for a card
    fn load_features(&self, id: CardId) -> Result<Option<FeatureSet>, Self::Error>;

    /// Every analyzed card with its features, by ascending id
    fn analyzed_cards(&self) -> Result<Vec<(CardId, FeatureSet)>, Self::Error>;

    /// Number of cards
    fn card_count(&self) -> Result<usize, Self::Error>;

    /// Number of cards with stored features
    fn analyzed_count(&self) -> Result<usize, Self::Error>;
}

/// Anything that can turn a card into a feature set
///
/// Implemented by the application layer (manaweave-extractor)
pub trait FeatureSource {
    /// Derive features for a card; never fails
    fn features_for(&self, card: &CardRecord) -> FeatureSet;
}
