//! Clique-growth clustering
//!
//! Starting from each unvisited vertex in ascending id order, a candidate
//! set grows depth-first: a neighbor joins only if it is adjacent to every
//! card already in the candidate set at that moment. The result depends on
//! visitation order and is not guaranteed to be a maximum clique. Vertices
//! swallowed by a candidate that ends up undersized stay visited.

use crate::Projection;
use manaweave_domain::CardId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Parameters for cluster search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterQuery {
    /// Edge threshold for the projection
    pub min_score: f64,
    /// Smallest cluster reported
    pub min_size: usize,
}

impl Default for ClusterQuery {
    fn default() -> Self {
        Self {
            min_score: 15.0,
            min_size: 3,
        }
    }
}

/// A group of cards that all synergize with each other
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Members, ascending
    pub members: Vec<CardId>,
    /// Mean total score over stored edges among the members
    pub average_score: f64,
    /// Stored edges among the members
    pub internal_edges: usize,
}

impl Cluster {
    /// Number of members
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Grow candidate cliques over the projection, keeping those of at least
/// `min_size` members
pub(crate) fn grow_cliques(projection: &Projection, min_size: usize) -> Vec<Vec<CardId>> {
    let mut visited: BTreeSet<CardId> = BTreeSet::new();
    let mut found = Vec::new();

    for start in projection.vertices() {
        if visited.contains(&start) {
            continue;
        }

        visited.insert(start);
        let mut members = vec![start];
        // (vertex, index of the next neighbor to try)
        let mut stack = vec![(start, 0usize)];

        while let Some((vertex, next)) = stack.pop() {
            let Some(&candidate) = projection.neighbors(vertex).get(next) else {
                continue;
            };
            stack.push((vertex, next + 1));

            if visited.contains(&candidate) {
                continue;
            }
            if members.iter().all(|&m| projection.is_adjacent(m, candidate)) {
                visited.insert(candidate);
                members.push(candidate);
                stack.push((candidate, 0));
            }
        }

        if members.len() >= min_size {
            members.sort_unstable();
            found.push(members);
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::tests::{edge, ids};

    #[test]
    fn test_triangle_is_one_cluster() {
        let edges = vec![edge(1, 2, 20.0), edge(1, 3, 20.0), edge(2, 3, 20.0)];
        let projection = Projection::from_edges(&edges, 15.0);

        assert_eq!(grow_cliques(&projection, 3), vec![ids(&[1, 2, 3])]);
    }

    #[test]
    fn test_path_is_not_a_clique() {
        let edges = vec![edge(1, 2, 20.0), edge(2, 3, 20.0)];
        let projection = Projection::from_edges(&edges, 15.0);

        // 1 takes 2; 3 is not adjacent to 1 and stays out
        assert!(grow_cliques(&projection, 3).is_empty());
        assert_eq!(grow_cliques(&projection, 1), vec![ids(&[1, 2]), ids(&[3])]);
    }

    #[test]
    fn test_two_disjoint_cliques() {
        let edges = vec![
            edge(1, 2, 20.0),
            edge(1, 3, 20.0),
            edge(2, 3, 20.0),
            edge(10, 11, 20.0),
            edge(10, 12, 20.0),
            edge(11, 12, 20.0),
            edge(3, 10, 5.0),
        ];
        let projection = Projection::from_edges(&edges, 15.0);

        assert_eq!(grow_cliques(&projection, 3), vec![ids(&[1, 2, 3]), ids(&[10, 11, 12])]);
    }

    #[test]
    fn test_growth_is_order_dependent() {
        // Clique {2, 3, 4} exists, but growth from 1 claims 2 first
        let edges = vec![
            edge(1, 2, 20.0),
            edge(2, 3, 20.0),
            edge(2, 4, 20.0),
            edge(3, 4, 20.0),
        ];
        let projection = Projection::from_edges(&edges, 15.0);

        assert!(grow_cliques(&projection, 3).is_empty());
    }

    #[test]
    fn test_k4_found_whole() {
        let mut edges = Vec::new();
        for x in 1..=4 {
            for y in (x + 1)..=4 {
                edges.push(edge(x, y, 30.0));
            }
        }
        let projection = Projection::from_edges(&edges, 15.0);
        assert_eq!(grow_cliques(&projection, 3), vec![ids(&[1, 2, 3, 4])]);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let edges: Vec<_> = (1..50_000).map(|v| edge(v, v + 1, 20.0)).collect();
        let projection = Projection::from_edges(&edges, 15.0);
        assert!(grow_cliques(&projection, 3).is_empty());
    }
}
