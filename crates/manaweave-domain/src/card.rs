//! Card identity and the raw card data features are derived from

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a card in the collection
///
/// Ids are assigned by the persistence layer; ordering matters because an
/// unordered pair of cards is always keyed lower id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(i64);

impl CardId {
    /// Create a CardId from its raw value
    ///
    /// # Examples
    ///
    /// ```
    /// use manaweave_domain::CardId;
    ///
    /// let id = CardId::from_value(42);
    /// assert_eq!(id.value(), 42);
    /// ```
    pub const fn from_value(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(CardId)
            .map_err(|e| format!("Invalid card id '{}': {}", s, e))
    }
}

/// Structured card metadata as supplied by the card-data enrichment source
///
/// Field names follow the Scryfall card object so enrichment payloads
/// deserialize directly. Every field is optional; missing data degrades
/// to empty features rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardMetadata {
    /// Card name
    pub name: Option<String>,

    /// Colors as mana letters ("W", "U", ...)
    pub colors: Vec<String>,

    /// Color identity as mana letters
    pub color_identity: Vec<String>,

    /// Full type line, e.g. "Legendary Creature — Elf Druid"
    pub type_line: Option<String>,

    /// Mana cost in brace notation, e.g. "{1}{G}{G}"
    pub mana_cost: Option<String>,

    /// Converted mana cost / mana value
    pub cmc: Option<f64>,

    /// Printed power ("2", "*", "X", "1+*")
    pub power: Option<String>,

    /// Printed toughness
    pub toughness: Option<String>,

    /// Starting loyalty for planeswalkers
    pub loyalty: Option<String>,

    /// Keyword abilities reported by the data source
    pub keywords: Vec<String>,

    /// Format legality map (format name → "legal", "not_legal", ...)
    pub legalities: BTreeMap<String, String>,

    /// Rarity ("common", "mythic", ...)
    pub rarity: Option<String>,

    /// Set code
    #[serde(rename = "set")]
    pub set_code: Option<String>,
}

/// A card as held by the collection: identity, oracle text and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    /// Card id
    pub id: CardId,

    /// Card name
    pub name: String,

    /// Oracle rules text (may be absent, e.g. vanilla creatures or basic lands)
    #[serde(default)]
    pub oracle_text: Option<String>,

    /// Structured metadata
    #[serde(default)]
    pub metadata: CardMetadata,
}

impl CardRecord {
    /// Create a record with empty metadata
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            oracle_text: None,
            metadata: CardMetadata::default(),
        }
    }

    /// Set the oracle text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = Some(text.into());
        self
    }

    /// Set the metadata
    pub fn with_metadata(mut self, metadata: CardMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
