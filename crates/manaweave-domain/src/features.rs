//! Feature sets derived from a card's text and metadata

use crate::color::ColorSet;
use crate::mana::ManaBreakdown;
use crate::stat::StatValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Strategy tag attached to a card by the extractor's archetype rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeTag {
    /// Cheap, hasty or evasive pressure
    Aggro,
    /// Counterspells, removal, card draw
    Control,
    /// Pieces that break open with the right partner
    Combo,
    /// Uses the graveyard as a resource
    Graveyard,
    /// Cares about creature types
    Tribal,
    /// Makes tokens
    Tokens,
    /// Uses +1/+1 and similar counters
    Counters,
    /// Artifact-centric
    Artifacts,
    /// Enchantment-centric
    Enchantments,
    /// Rewards casting instants and sorceries
    Spellslinger,
    /// Gains life or cares about it
    Lifegain,
    /// Accelerates mana
    Ramp,
    /// Sacrifices permanents
    Sacrifice,
}

impl ArchetypeTag {
    /// Every tag, in declaration order
    pub const ALL: [ArchetypeTag; 13] = [
        ArchetypeTag::Aggro,
        ArchetypeTag::Control,
        ArchetypeTag::Combo,
        ArchetypeTag::Graveyard,
        ArchetypeTag::Tribal,
        ArchetypeTag::Tokens,
        ArchetypeTag::Counters,
        ArchetypeTag::Artifacts,
        ArchetypeTag::Enchantments,
        ArchetypeTag::Spellslinger,
        ArchetypeTag::Lifegain,
        ArchetypeTag::Ramp,
        ArchetypeTag::Sacrifice,
    ];

    /// Get the tag name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchetypeTag::Aggro => "aggro",
            ArchetypeTag::Control => "control",
            ArchetypeTag::Combo => "combo",
            ArchetypeTag::Graveyard => "graveyard",
            ArchetypeTag::Tribal => "tribal",
            ArchetypeTag::Tokens => "tokens",
            ArchetypeTag::Counters => "counters",
            ArchetypeTag::Artifacts => "artifacts",
            ArchetypeTag::Enchantments => "enchantments",
            ArchetypeTag::Spellslinger => "spellslinger",
            ArchetypeTag::Lifegain => "lifegain",
            ArchetypeTag::Ramp => "ramp",
            ArchetypeTag::Sacrifice => "sacrifice",
        }
    }

    /// Parse a tag from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl fmt::Display for ArchetypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ArchetypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid archetype: {}", s))
    }
}

/// Combo-potential tag attached by the extractor's combo rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboTag {
    /// Text that can produce unbounded mana
    InfiniteMana,
    /// Text that can produce unbounded tokens
    InfiniteTokens,
    /// Adds mana
    ManaGeneration,
    /// Untaps permanents
    UntapEffects,
    /// Searches the library
    Tutoring,
    /// Returns cards from the graveyard
    Recursion,
    /// Mills cards
    Mill,
    /// Sacrifices as a cost
    SacrificeOutlet,
    /// Copies spells or permanents
    CopyEffects,
    /// Takes extra turns
    ExtraTurns,
}

impl ComboTag {
    /// Every tag, in declaration order
    pub const ALL: [ComboTag; 10] = [
        ComboTag::InfiniteMana,
        ComboTag::InfiniteTokens,
        ComboTag::ManaGeneration,
        ComboTag::UntapEffects,
        ComboTag::Tutoring,
        ComboTag::Recursion,
        ComboTag::Mill,
        ComboTag::SacrificeOutlet,
        ComboTag::CopyEffects,
        ComboTag::ExtraTurns,
    ];

    /// Get the tag name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ComboTag::InfiniteMana => "infinite_mana",
            ComboTag::InfiniteTokens => "infinite_tokens",
            ComboTag::ManaGeneration => "mana_generation",
            ComboTag::UntapEffects => "untap_effects",
            ComboTag::Tutoring => "tutoring",
            ComboTag::Recursion => "recursion",
            ComboTag::Mill => "mill",
            ComboTag::SacrificeOutlet => "sacrifice_outlet",
            ComboTag::CopyEffects => "copy_effects",
            ComboTag::ExtraTurns => "extra_turns",
        }
    }

    /// Parse a tag from its name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl fmt::Display for ComboTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComboTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid combo tag: {}", s))
    }
}

/// Everything the scorer knows about one card
///
/// Built once by the extractor and treated as read-only afterwards;
/// re-analysing a card produces a fresh value. All word sets are
/// lower-cased. Missing input leaves the corresponding field empty, so
/// [`FeatureSet::default`] is the feature set of a card with no text and
/// no metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    /// Card name, when known
    pub name: Option<String>,

    /// Lower-cased oracle text the features were taken from
    pub text: String,

    /// Ability keywords (text and metadata)
    pub keywords: BTreeSet<String>,

    /// Game actions referenced (draw, destroy, sacrifice, ...)
    pub actions: BTreeSet<String>,

    /// Zones referenced (graveyard, exile, ...)
    pub zones: BTreeSet<String>,

    /// Mana words and symbol colors referenced in text
    pub mana_references: BTreeSet<String>,

    /// Counter kinds referenced ("+1/+1", "loyalty", ...)
    pub counters: BTreeSet<String>,

    /// Card types from the type line
    pub card_types: BTreeSet<String>,

    /// Supertypes from the type line (legendary, basic, snow, ...)
    pub supertypes: BTreeSet<String>,

    /// Creature types
    pub creature_types: BTreeSet<String>,

    /// Planeswalker types
    pub planeswalker_types: BTreeSet<String>,

    /// Artifact subtypes (equipment, vehicle, ...)
    pub artifact_subtypes: BTreeSet<String>,

    /// Enchantment subtypes (aura, saga, ...)
    pub enchantment_subtypes: BTreeSet<String>,

    /// Land subtypes (forest, gate, ...)
    pub land_types: BTreeSet<String>,

    /// Colors
    pub colors: ColorSet,

    /// Color identity
    pub color_identity: ColorSet,

    /// Mana cost breakdown
    pub mana: ManaBreakdown,

    /// Mana value (converted mana cost)
    pub mana_value: f64,

    /// Power
    pub power: Option<StatValue>,

    /// Toughness
    pub toughness: Option<StatValue>,

    /// Starting loyalty
    pub loyalty: Option<StatValue>,

    /// Formats the card is legal or restricted in
    pub legal_formats: BTreeSet<String>,

    /// Rarity
    pub rarity: Option<String>,

    /// Set code
    pub set_code: Option<String>,

    /// Archetype tags
    pub archetypes: BTreeSet<ArchetypeTag>,

    /// Combo-potential tags
    pub combos: BTreeSet<ComboTag>,

    /// Determiner-led noun phrases (not used for scoring)
    pub noun_phrases: Vec<String>,

    /// Capitalised word runs (not used for scoring)
    pub named_entities: Vec<String>,

    /// Word tokens of the text, when requested
    pub raw_tokens: Vec<String>,
}

impl FeatureSet {
    /// Ratio of colored symbols to mana value, 0 for free cards
    pub fn color_ratio(&self) -> f64 {
        if self.mana_value > 0.0 {
            f64::from(self.mana.colored_symbols) / self.mana_value
        } else {
            0.0
        }
    }

    /// Whether the card is a creature
    pub fn is_creature(&self) -> bool {
        self.card_types.contains("creature")
    }

    /// Whether no feature at all was extracted
    pub fn is_empty(&self) -> bool {
        self == &FeatureSet::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names_round_trip() {
        for tag in ArchetypeTag::ALL {
            assert_eq!(ArchetypeTag::parse(tag.as_str()), Some(tag));
        }
        for tag in ComboTag::ALL {
            assert_eq!(ComboTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(ComboTag::parse("Infinite_Mana"), Some(ComboTag::InfiniteMana));
        assert!("voltron".parse::<ArchetypeTag>().is_err());
    }

    #[test]
    fn test_default_is_empty() {
        let features = FeatureSet::default();
        assert!(features.is_empty());
        assert_eq!(features.color_ratio(), 0.0);
    }

    #[test]
    fn test_serializes_as_flat_record() {
        let mut features = FeatureSet::default();
        features.keywords.insert("flying".to_string());
        features.archetypes.insert(ArchetypeTag::Graveyard);
        features.combos.insert(ComboTag::SacrificeOutlet);
        features.power = Some(StatValue::Star);

        let json = serde_json::to_value(&features).unwrap();
        assert_eq!(json["keywords"][0], "flying");
        assert_eq!(json["archetypes"][0], "graveyard");
        assert_eq!(json["combos"][0], "sacrifice_outlet");
        assert_eq!(json["power"], "star");

        let back: FeatureSet = serde_json::from_value(json).unwrap();
        assert_eq!(back, features);
    }

    #[test]
    fn test_missing_fields_default() {
        let features: FeatureSet = serde_json::from_str(r#"{"keywords": ["haste"]}"#).unwrap();
        assert!(features.keywords.contains("haste"));
        assert!(features.creature_types.is_empty());
        assert_eq!(features.mana, ManaBreakdown::default());
    }
}
