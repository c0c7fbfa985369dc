//! Strategy anchors: cards that recur among the strongest synergies

use manaweave_domain::{CardId, SynergyEdge, SynergyScore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Restricts anchor search to edges carrying a particular kind of synergy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorFocus {
    /// No restriction
    #[default]
    Any,
    /// Tribal score ≥ 10
    Tribal,
    /// Combo score ≥ 10
    Combo,
    /// Archetype score ≥ 8
    Control,
}

impl AnchorFocus {
    /// All focus values
    pub const ALL: [AnchorFocus; 4] = [Self::Any, Self::Tribal, Self::Combo, Self::Control];

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Tribal => "tribal",
            Self::Combo => "combo",
            Self::Control => "control",
        }
    }

    /// Parse a focus name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Whether an edge's components match this focus
    pub fn admits(&self, score: &SynergyScore) -> bool {
        match self {
            Self::Any => true,
            Self::Tribal => score.tribal >= 10.0,
            Self::Combo => score.combo >= 10.0,
            Self::Control => score.archetype >= 8.0,
        }
    }
}

impl fmt::Display for AnchorFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorFocus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown focus '{}' (any, tribal, combo, control)", s))
    }
}

/// Parameters for anchor search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorQuery {
    /// Edges below this total are ignored
    pub min_score: f64,
    /// Component restriction
    pub focus: AnchorFocus,
    /// Only the strongest this many edges are examined
    pub edge_limit: usize,
    /// Appearances needed to be reported
    pub min_appearances: usize,
    /// Anchors reported
    pub limit: usize,
}

impl Default for AnchorQuery {
    fn default() -> Self {
        Self {
            min_score: 20.0,
            focus: AnchorFocus::Any,
            edge_limit: 200,
            min_appearances: 3,
            limit: 20,
        }
    }
}

/// A card appearing repeatedly among the strongest edges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    /// Card id
    pub id: CardId,
    /// Strong edges the card appears in
    pub appearances: usize,
    /// Mean total over those edges
    pub average_score: f64,
    /// Sum of totals over those edges
    pub total_score: f64,
}

pub(crate) fn rank_anchors(edges: &[SynergyEdge], query: &AnchorQuery) -> Vec<Anchor> {
    let mut strongest: Vec<&SynergyEdge> = edges
        .iter()
        .filter(|e| e.total() >= query.min_score && query.focus.admits(&e.score))
        .collect();
    strongest.sort_by(|a, b| b.total().total_cmp(&a.total()).then_with(|| a.pair.cmp(&b.pair)));
    strongest.truncate(query.edge_limit);

    let mut tallies: BTreeMap<CardId, (usize, f64)> = BTreeMap::new();
    for edge in strongest {
        for id in [edge.pair.low(), edge.pair.high()] {
            let (count, sum) = tallies.entry(id).or_insert((0, 0.0));
            *count += 1;
            *sum += edge.total();
        }
    }

    let mut anchors: Vec<Anchor> = tallies
        .into_iter()
        .filter(|(_, (count, _))| *count >= query.min_appearances.max(1))
        .map(|(id, (count, sum))| Anchor {
            id,
            appearances: count,
            average_score: sum / count as f64,
            total_score: sum,
        })
        .collect();

    anchors.sort_by(|a, b| {
        b.appearances
            .cmp(&a.appearances)
            .then_with(|| b.average_score.total_cmp(&a.average_score))
            .then_with(|| a.id.cmp(&b.id))
    });
    anchors.truncate(query.limit);
    anchors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::tests::edge;

    #[test]
    fn test_focus_parse() {
        assert_eq!(AnchorFocus::parse("Tribal"), Some(AnchorFocus::Tribal));
        assert_eq!("control".parse::<AnchorFocus>(), Ok(AnchorFocus::Control));
        assert!("ramp".parse::<AnchorFocus>().is_err());
    }

    #[test]
    fn test_recurring_card_ranked_first() {
        let edges = vec![
            edge(1, 2, 25.0),
            edge(1, 3, 25.0),
            edge(1, 4, 25.0),
            edge(2, 3, 40.0),
            edge(2, 4, 21.0),
        ];
        let query = AnchorQuery {
            min_appearances: 2,
            ..Default::default()
        };
        let anchors = rank_anchors(&edges, &query);
        let order: Vec<i64> = anchors.iter().map(|a| a.id.value()).collect();

        // 2 appears three times with the best average
        assert_eq!(order, vec![2, 1, 3, 4]);
        assert_eq!(anchors[0].appearances, 3);
        assert_eq!(anchors[0].total_score, 86.0);
    }

    #[test]
    fn test_edge_limit_keeps_strongest() {
        let edges = vec![edge(1, 2, 50.0), edge(3, 4, 30.0), edge(3, 5, 30.0)];
        let query = AnchorQuery {
            edge_limit: 1,
            min_appearances: 1,
            ..Default::default()
        };
        let ids: Vec<i64> = rank_anchors(&edges, &query).iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_focus_filters_edges() {
        let mut tribal = edge(1, 2, 30.0);
        tribal.score.tribal = 10.0;
        let plain = edge(3, 4, 30.0);

        let query = AnchorQuery {
            focus: AnchorFocus::Tribal,
            min_appearances: 1,
            ..Default::default()
        };
        let ids: Vec<i64> = rank_anchors(&[tribal, plain], &query).iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_default_requires_three_appearances() {
        let edges = vec![edge(1, 2, 30.0), edge(1, 3, 30.0)];
        assert!(rank_anchors(&edges, &AnchorQuery::default()).is_empty());
    }
}
