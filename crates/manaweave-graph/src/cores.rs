//! Deck cores: connected components of the high-score projection

use crate::Projection;
use manaweave_domain::CardId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Parameters for deck-core discovery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreQuery {
    /// Edge threshold for the projection
    pub min_score: f64,
    /// Smallest core reported
    pub min_size: usize,
}

impl Default for CoreQuery {
    fn default() -> Self {
        Self {
            min_score: 20.0,
            min_size: 3,
        }
    }
}

/// A connected group of strongly synergizing cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckCore {
    /// Members, ascending
    pub members: Vec<CardId>,
    /// Mean total score over stored edges among the members
    pub average_score: f64,
    /// Stored edges among the members
    pub internal_edges: usize,
}

impl DeckCore {
    /// Number of members
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Connected components with at least `min_size` members, in order of
/// their smallest card id
pub(crate) fn components(projection: &Projection, min_size: usize) -> Vec<Vec<CardId>> {
    let mut visited: BTreeSet<CardId> = BTreeSet::new();
    let mut found = Vec::new();

    for start in projection.vertices() {
        if !visited.insert(start) {
            continue;
        }

        let mut members = Vec::new();
        let mut stack = vec![start];
        while let Some(vertex) = stack.pop() {
            members.push(vertex);
            for &next in projection.neighbors(vertex) {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }

        if members.len() >= min_size {
            members.sort_unstable();
            found.push(members);
        }
    }

    found
}
