//! Threshold projection of the synergy graph

use manaweave_domain::{CardId, CardPair, SynergyEdge};
use std::collections::BTreeMap;

/// Undirected adjacency over the edges at or above a score threshold
///
/// Vertices and neighbor lists are kept in ascending id order, so every
/// traversal over a projection visits cards in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    threshold: f64,
    adjacency: BTreeMap<CardId, Vec<CardId>>,
    weights: BTreeMap<CardPair, f64>,
}

impl Projection {
    /// Build a projection from edges, keeping those with total ≥ `threshold`
    pub fn from_edges<'a, I>(edges: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = &'a SynergyEdge>,
    {
        let mut adjacency: BTreeMap<CardId, Vec<CardId>> = BTreeMap::new();
        let mut weights = BTreeMap::new();

        for edge in edges.into_iter().filter(|e| e.total() >= threshold) {
            let (low, high) = (edge.pair.low(), edge.pair.high());
            if weights.insert(edge.pair, edge.total()).is_none() {
                adjacency.entry(low).or_default().push(high);
                adjacency.entry(high).or_default().push(low);
            }
        }
        for neighbors in adjacency.values_mut() {
            neighbors.sort_unstable();
        }

        Self {
            threshold,
            adjacency,
            weights,
        }
    }

    /// Threshold the projection was built with
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Cards with at least one edge, ascending
    pub fn vertices(&self) -> impl Iterator<Item = CardId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Neighbors of a card, ascending; empty for an unknown card
    pub fn neighbors(&self, id: CardId) -> &[CardId] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether two cards share an edge in this projection
    pub fn is_adjacent(&self, x: CardId, y: CardId) -> bool {
        CardPair::new(x, y).is_some_and(|pair| self.weights.contains_key(&pair))
    }

    /// Total score of the edge between two cards, if projected
    pub fn weight(&self, x: CardId, y: CardId) -> Option<f64> {
        CardPair::new(x, y).and_then(|pair| self.weights.get(&pair).copied())
    }

    /// Number of projected edges incident to a card
    pub fn degree(&self, id: CardId) -> usize {
        self.neighbors(id).len()
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Whether the projection has no edges
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use manaweave_domain::{SynergyScore, ANALYSIS_VERSION};

    pub(crate) fn edge(x: i64, y: i64, total: f64) -> SynergyEdge {
        SynergyEdge {
            pair: CardPair::new(CardId::from_value(x), CardId::from_value(y)).unwrap(),
            score: SynergyScore {
                total,
                ..Default::default()
            },
            analysis_version: ANALYSIS_VERSION.to_string(),
            updated_at: 0,
        }
    }

    pub(crate) fn ids(values: &[i64]) -> Vec<CardId> {
        values.iter().copied().map(CardId::from_value).collect()
    }

    #[test]
    fn test_threshold_filters_edges() {
        let edges = vec![edge(1, 2, 20.0), edge(2, 3, 10.0), edge(3, 4, 15.0)];
        let projection = Projection::from_edges(&edges, 15.0);

        assert_eq!(projection.edge_count(), 2);
        assert_eq!(projection.vertices().collect::<Vec<_>>(), ids(&[1, 2, 3, 4]));
        assert!(projection.is_adjacent(CardId::from_value(2), CardId::from_value(1)));
        assert!(!projection.is_adjacent(CardId::from_value(2), CardId::from_value(3)));
        assert_eq!(projection.weight(CardId::from_value(4), CardId::from_value(3)), Some(15.0));
    }

    #[test]
    fn test_neighbors_sorted() {
        let edges = vec![edge(5, 9, 1.0), edge(1, 5, 1.0), edge(5, 7, 1.0)];
        let projection = Projection::from_edges(&edges, 0.0);

        assert_eq!(projection.neighbors(CardId::from_value(5)), ids(&[1, 7, 9]).as_slice());
        assert_eq!(projection.degree(CardId::from_value(5)), 3);
    }

    #[test]
    fn test_unknown_card_has_no_neighbors() {
        let projection = Projection::from_edges(&[edge(1, 2, 5.0)], 0.0);
        assert!(projection.neighbors(CardId::from_value(42)).is_empty());
        assert!(!projection.is_adjacent(CardId::from_value(1), CardId::from_value(1)));
    }

    #[test]
    fn test_duplicate_edges_counted_once() {
        let edges = vec![edge(1, 2, 5.0), edge(2, 1, 6.0)];
        let projection = Projection::from_edges(&edges, 0.0);
        assert_eq!(projection.edge_count(), 1);
        assert_eq!(projection.degree(CardId::from_value(1)), 1);
    }
}
