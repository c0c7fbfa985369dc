//! Hub cards: cards with many strong synergies

use manaweave_domain::{CardId, SynergyEdge};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters for hub detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubQuery {
    /// Edges below this total are ignored
    pub min_score: f64,
    /// Incident edges needed to count as a hub
    pub min_edges: usize,
    /// Tribal score for an edge to count as tribal
    pub tribal_floor: f64,
    /// Combo score for an edge to count as combo
    pub combo_floor: f64,
}

impl Default for HubQuery {
    fn default() -> Self {
        Self {
            min_score: 5.0,
            min_edges: 10,
            tribal_floor: 5.0,
            combo_floor: 5.0,
        }
    }
}

/// A card and the statistics of its incident edges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hub {
    /// Card id
    pub id: CardId,
    /// Incident edges at or above the score floor
    pub edge_count: usize,
    /// Mean total over those edges
    pub average_score: f64,
    /// Best total among them
    pub max_score: f64,
    /// How many also reach the tribal floor
    pub tribal_edges: usize,
    /// How many also reach the combo floor
    pub combo_edges: usize,
}

#[derive(Default)]
struct Tally {
    count: usize,
    sum: f64,
    max: f64,
    tribal: usize,
    combo: usize,
}

/// Tally incident edges per card and keep the hubs, most connected first
///
/// Ties are broken by average score, then ascending id.
pub(crate) fn rank_hubs(edges: &[SynergyEdge], query: &HubQuery) -> Vec<Hub> {
    let mut tallies: BTreeMap<CardId, Tally> = BTreeMap::new();

    for edge in edges.iter().filter(|e| e.total() >= query.min_score) {
        for id in [edge.pair.low(), edge.pair.high()] {
            let tally = tallies.entry(id).or_default();
            tally.count += 1;
            tally.sum += edge.total();
            tally.max = tally.max.max(edge.total());
            if edge.score.tribal >= query.tribal_floor {
                tally.tribal += 1;
            }
            if edge.score.combo >= query.combo_floor {
                tally.combo += 1;
            }
        }
    }

    let mut hubs: Vec<Hub> = tallies
        .into_iter()
        .filter(|(_, t)| t.count >= query.min_edges)
        .map(|(id, t)| Hub {
            id,
            edge_count: t.count,
            average_score: t.sum / t.count as f64,
            max_score: t.max,
            tribal_edges: t.tribal,
            combo_edges: t.combo,
        })
        .collect();

    hubs.sort_by(|a, b| {
        b.edge_count
            .cmp(&a.edge_count)
            .then_with(|| b.average_score.total_cmp(&a.average_score))
            .then_with(|| a.id.cmp(&b.id))
    });
    hubs
}
