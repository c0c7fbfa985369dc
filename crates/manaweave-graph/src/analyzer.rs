//! Read-only analysis over a synergy store

use crate::anchors::rank_anchors;
use crate::clusters::grow_cliques;
use crate::cores::components;
use crate::hubs::rank_hubs;
use crate::status::{
    completion_rate, ComponentCounts, ScoreDistribution, GOOD_SCORE, HIGH_SCORE, MODERATE_SCORE,
    STRONG_COMPONENT, SUPPORTING_COMPONENT,
};
use crate::{
    Anchor, AnchorQuery, Cluster, ClusterQuery, CoreQuery, DeckCore, GraphError, GraphStatus, Hub,
    HubQuery, Projection, Result,
};
use manaweave_domain::traits::SynergyStore;
use manaweave_domain::{pair_count, CardId, ScoreField};
use std::fmt::Display;
use tracing::debug;

fn store_error<E: Display>(e: E) -> GraphError {
    GraphError::Store(e.to_string())
}

/// Runs graph reports against a store without modifying it
///
/// # Examples
///
/// ```
/// use manaweave_domain::traits::SynergyStore;
/// use manaweave_domain::{CardId, SynergyScore};
/// use manaweave_graph::{ClusterQuery, GraphAnalyzer};
/// use manaweave_store::SqliteStore;
///
/// let mut store = SqliteStore::new(":memory:").unwrap();
/// let strong = SynergyScore { total: 20.0, ..Default::default() };
/// for (x, y) in [(1, 2), (1, 3), (2, 3)] {
///     store.put(CardId::from_value(x), CardId::from_value(y), &strong).unwrap();
/// }
///
/// let analyzer = GraphAnalyzer::new(&store);
/// let clusters = analyzer.clusters(&ClusterQuery::default()).unwrap();
/// assert_eq!(clusters.len(), 1);
/// assert_eq!(clusters[0].size(), 3);
/// ```
pub struct GraphAnalyzer<'a, S> {
    store: &'a S,
}

impl<'a, S> GraphAnalyzer<'a, S>
where
    S: SynergyStore,
    S::Error: Display,
{
    /// Create an analyzer over a store
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Adjacency over stored edges with total ≥ `threshold`
    pub fn projection(&self, threshold: f64) -> Result<Projection> {
        let edges = self.store.edges_at_least(threshold).map_err(store_error)?;
        let projection = Projection::from_edges(&edges, threshold);
        debug!(
            "Projected {} edges over {} cards at threshold {}",
            projection.edge_count(),
            projection.vertex_count(),
            threshold
        );
        Ok(projection)
    }

    /// Partners of a card with total ≥ `threshold`, best first
    ///
    /// An unknown card has no neighbors.
    pub fn neighbors(&self, id: CardId, threshold: f64) -> Result<Vec<(CardId, f64)>> {
        let edges = self.store.for_card(id, threshold, usize::MAX).map_err(store_error)?;
        Ok(edges
            .iter()
            .filter_map(|e| e.pair.partner(id).map(|partner| (partner, e.total())))
            .collect())
    }

    /// Clique-growth clusters, best average first
    pub fn clusters(&self, query: &ClusterQuery) -> Result<Vec<Cluster>> {
        let projection = self.projection(query.min_score)?;
        let mut clusters = Vec::new();
        for members in grow_cliques(&projection, query.min_size) {
            let (average_score, internal_edges) = self.internal_average(&members)?;
            clusters.push(Cluster {
                members,
                average_score,
                internal_edges,
            });
        }
        clusters.sort_by(|a, b| {
            b.average_score
                .total_cmp(&a.average_score)
                .then_with(|| a.members.cmp(&b.members))
        });
        debug!("Found {} clusters", clusters.len());
        Ok(clusters)
    }

    /// Cards with at least `min_edges` incident edges
    pub fn hubs(&self, query: &HubQuery) -> Result<Vec<Hub>> {
        let edges = self.store.edges_at_least(query.min_score).map_err(store_error)?;
        let hubs = rank_hubs(&edges, query);
        debug!("Found {} hubs among {} edges", hubs.len(), edges.len());
        Ok(hubs)
    }

    /// Connected components of the high-score projection, best average first
    pub fn deck_cores(&self, query: &CoreQuery) -> Result<Vec<DeckCore>> {
        let projection = self.projection(query.min_score)?;
        let mut cores = Vec::new();
        for members in components(&projection, query.min_size) {
            let (average_score, internal_edges) = self.internal_average(&members)?;
            cores.push(DeckCore {
                members,
                average_score,
                internal_edges,
            });
        }
        cores.sort_by(|a, b| {
            b.average_score
                .total_cmp(&a.average_score)
                .then_with(|| a.members.cmp(&b.members))
        });
        debug!("Found {} deck cores", cores.len());
        Ok(cores)
    }

    /// Cards recurring among the strongest edges
    pub fn anchors(&self, query: &AnchorQuery) -> Result<Vec<Anchor>> {
        let edges = self.store.edges_at_least(query.min_score).map_err(store_error)?;
        Ok(rank_anchors(&edges, query))
    }

    /// Edge counts, score bands and completion for the stored graph
    ///
    /// Card counts come from the catalog, which this analyzer does not see.
    pub fn status(&self, total_cards: usize, analyzed_cards: usize) -> Result<GraphStatus> {
        let count = |field: ScoreField, min: f64| {
            self.store.count_at_least(field, min).map_err(store_error)
        };

        let total_edges = self.store.count().map_err(store_error)?;
        let high = count(ScoreField::Total, HIGH_SCORE)?;
        let at_least_good = count(ScoreField::Total, GOOD_SCORE)?;
        let at_least_moderate = count(ScoreField::Total, MODERATE_SCORE)?;

        let distribution = ScoreDistribution {
            high,
            good: at_least_good.saturating_sub(high),
            moderate: at_least_moderate.saturating_sub(at_least_good),
            low: total_edges.saturating_sub(at_least_moderate),
        };
        let components = ComponentCounts {
            tribal: count(ScoreField::Tribal, STRONG_COMPONENT)?,
            combo: count(ScoreField::Combo, STRONG_COMPONENT)?,
            archetype: count(ScoreField::Archetype, STRONG_COMPONENT)?,
            keyword: count(ScoreField::Keyword, SUPPORTING_COMPONENT)?,
            type_score: count(ScoreField::Type, SUPPORTING_COMPONENT)?,
        };

        let top_edge = self.store.top_n(1, 0.0).map_err(store_error)?.into_iter().next();
        let expected_pairs = pair_count(analyzed_cards);

        Ok(GraphStatus {
            total_cards,
            analyzed_cards,
            total_edges,
            expected_pairs,
            completion_rate: completion_rate(total_edges, expected_pairs),
            distribution,
            components,
            top_edge,
        })
    }

    /// Mean total over stored edges among `members`, any score
    ///
    /// Returns 0 when fewer than two such edges exist.
    fn internal_average(&self, members: &[CardId]) -> Result<(f64, usize)> {
        let mut sum = 0.0;
        let mut edges = 0;
        for (i, &x) in members.iter().enumerate() {
            for &y in &members[i + 1..] {
                if let Some(score) = self.store.get(x, y).map_err(store_error)? {
                    sum += score.total;
                    edges += 1;
                }
            }
        }
        let average = if edges < 2 { 0.0 } else { sum / edges as f64 };
        Ok((average, edges))
    }
}
