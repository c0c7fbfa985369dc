//! Unordered card pairs and persisted synergy edges

use crate::card::CardId;
use crate::score::SynergyScore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version tag written alongside every stored edge
pub const ANALYSIS_VERSION: &str = "1.0";

/// An unordered pair of distinct cards, always held lower id first
///
/// `CardPair::new(a, b)` and `CardPair::new(b, a)` are equal, which is
/// what makes the store order-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardPair {
    low: CardId,
    high: CardId,
}

impl CardPair {
    /// Normalize two ids into a pair
    ///
    /// Returns `None` when both ids are the same card.
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_domain::{CardId, CardPair};
    ///
    /// let a = CardId::from_value(9);
    /// let b = CardId::from_value(4);
    /// let pair = CardPair::new(a, b).unwrap();
    /// assert_eq!(pair.low(), b);
    /// assert_eq!(pair, CardPair::new(b, a).unwrap());
    /// assert!(CardPair::new(a, a).is_none());
    /// ```
    pub fn new(x: CardId, y: CardId) -> Option<Self> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Some(Self { low: x, high: y }),
            std::cmp::Ordering::Greater => Some(Self { low: y, high: x }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Lower id
    pub fn low(&self) -> CardId {
        self.low
    }

    /// Higher id
    pub fn high(&self) -> CardId {
        self.high
    }

    /// Whether `id` is one of the two endpoints
    pub fn contains(&self, id: CardId) -> bool {
        self.low == id || self.high == id
    }

    /// The other endpoint, if `id` is one of them
    pub fn partner(&self, id: CardId) -> Option<CardId> {
        if id == self.low {
            Some(self.high)
        } else if id == self.high {
            Some(self.low)
        } else {
            None
        }
    }
}

impl fmt::Display for CardPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// A stored score between two cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyEdge {
    /// Normalized card pair
    pub pair: CardPair,

    /// Last computed score
    pub score: SynergyScore,

    /// Analysis version that produced the score
    pub analysis_version: String,

    /// Unix timestamp (seconds) of the last write
    pub updated_at: i64,
}

impl SynergyEdge {
    /// Total score shorthand
    pub fn total(&self) -> f64 {
        self.score.total
    }
}

/// Number of unordered pairs among `n` cards
pub fn pair_count(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1)) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: i64) -> CardId {
        CardId::from_value(v)
    }

    #[test]
    fn test_partner() {
        let pair = CardPair::new(id(2), id(7)).unwrap();
        assert_eq!(pair.partner(id(2)), Some(id(7)));
        assert_eq!(pair.partner(id(7)), Some(id(2)));
        assert_eq!(pair.partner(id(3)), None);
        assert!(pair.contains(id(7)));
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(5), 10);
    }

    #[test]
    fn test_negative_ids_order() {
        let pair = CardPair::new(id(1), id(-5)).unwrap();
        assert_eq!(pair.low(), id(-5));
        assert_eq!(pair.high(), id(1));
    }
}
