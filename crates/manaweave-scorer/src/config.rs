//! Scorer configuration: component weights and per-tag weight tables

use manaweave_domain::{ArchetypeTag, ComboTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Multipliers applied to each component when computing the total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    /// Tribal weight
    pub tribal: f64,
    /// Archetype weight
    pub archetype: f64,
    /// Combo weight
    pub combo: f64,
    /// Keyword weight
    pub keyword: f64,
    /// Type weight
    #[serde(rename = "type")]
    pub type_score: f64,
    /// Color weight
    pub color: f64,
    /// Mana curve weight
    pub mana_curve: f64,
    /// Format weight
    pub format: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            tribal: 5.0,
            archetype: 4.0,
            combo: 4.0,
            keyword: 3.0,
            type_score: 2.0,
            color: 1.5,
            mana_curve: 1.0,
            format: 0.5,
        }
    }
}

impl ComponentWeights {
    /// Every component weighted 1.0, so the total is the plain sum
    pub fn uniform() -> Self {
        Self {
            tribal: 1.0,
            archetype: 1.0,
            combo: 1.0,
            keyword: 1.0,
            type_score: 1.0,
            color: 1.0,
            mana_curve: 1.0,
            format: 1.0,
        }
    }

    fn named(&self) -> [(&'static str, f64); 8] {
        [
            ("tribal", self.tribal),
            ("archetype", self.archetype),
            ("combo", self.combo),
            ("keyword", self.keyword),
            ("type", self.type_score),
            ("color", self.color),
            ("mana_curve", self.mana_curve),
            ("format", self.format),
        ]
    }
}

/// Configuration for the SynergyScorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Component multipliers for the total
    pub weights: ComponentWeights,

    /// Points per shared archetype tag, keyed by tag name
    pub archetype_weights: BTreeMap<String, f64>,

    /// Points for a shared archetype tag missing from the table
    pub default_archetype_weight: f64,

    /// Points per shared combo tag, keyed by tag name
    pub combo_weights: BTreeMap<String, f64>,

    /// Points for a shared combo tag missing from the table
    pub default_combo_weight: f64,

    /// Points per shared legal format, keyed by format name
    pub format_weights: BTreeMap<String, f64>,

    /// Points for a shared format missing from the table
    pub default_format_weight: f64,

    /// Keywords worth double when shared
    pub privileged_keywords: Vec<String>,

    /// Keyword pairs that reward one card having each side
    pub complementary_keywords: Vec<(String, String)>,

    /// Bonus for mana generation on one card and untap effects on the other
    pub mana_untap_bonus: f64,

    /// Bonus for tutoring on one card and recursion on the other
    pub tutor_recursion_bonus: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        let archetype_weights = [
            (ArchetypeTag::Graveyard, 5.0),
            (ArchetypeTag::Tribal, 5.0),
            (ArchetypeTag::Combo, 4.0),
            (ArchetypeTag::Tokens, 3.0),
            (ArchetypeTag::Counters, 3.0),
            (ArchetypeTag::Artifacts, 3.0),
            (ArchetypeTag::Enchantments, 3.0),
            (ArchetypeTag::Spellslinger, 3.0),
            (ArchetypeTag::Sacrifice, 3.0),
            (ArchetypeTag::Ramp, 3.0),
            (ArchetypeTag::Lifegain, 3.0),
            (ArchetypeTag::Aggro, 2.0),
            (ArchetypeTag::Control, 2.0),
        ]
        .into_iter()
        .map(|(tag, w)| (tag.as_str().to_string(), w))
        .collect();

        let combo_weights = [
            (ComboTag::InfiniteMana, 5.0),
            (ComboTag::InfiniteTokens, 5.0),
            (ComboTag::ExtraTurns, 4.0),
            (ComboTag::Tutoring, 3.0),
            (ComboTag::Recursion, 3.0),
            (ComboTag::Mill, 3.0),
            (ComboTag::SacrificeOutlet, 3.0),
            (ComboTag::CopyEffects, 3.0),
            (ComboTag::ManaGeneration, 2.0),
            (ComboTag::UntapEffects, 2.0),
        ]
        .into_iter()
        .map(|(tag, w)| (tag.as_str().to_string(), w))
        .collect();

        let format_weights = [
            ("commander", 1.0),
            ("modern", 0.8),
            ("standard", 0.8),
            ("pioneer", 0.7),
            ("legacy", 0.6),
            ("pauper", 0.6),
            ("vintage", 0.5),
            ("historic", 0.4),
            ("brawl", 0.4),
        ]
        .into_iter()
        .map(|(format, w)| (format.to_string(), w))
        .collect();

        let complementary_keywords = [
            ("deathtouch", "first strike"),
            ("deathtouch", "trample"),
            ("lifelink", "double strike"),
            ("infect", "proliferate"),
            ("flying", "exalted"),
            ("flash", "prowess"),
        ]
        .into_iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect();

        Self {
            weights: ComponentWeights::default(),
            archetype_weights,
            default_archetype_weight: 2.0,
            combo_weights,
            default_combo_weight: 2.0,
            format_weights,
            default_format_weight: 0.2,
            privileged_keywords: ["flying", "deathtouch", "lifelink", "vigilance", "trample"]
                .into_iter()
                .map(String::from)
                .collect(),
            complementary_keywords,
            mana_untap_bonus: 3.0,
            tutor_recursion_bonus: 2.0,
        }
    }
}

impl ScorerConfig {
    /// Default tables with every component weighted 1.0
    pub fn unweighted() -> Self {
        Self {
            weights: ComponentWeights::uniform(),
            ..Self::default()
        }
    }

    /// Validate the configuration
    ///
    /// Every weight must be finite and non-negative, otherwise component
    /// scores (and the total) could go negative.
    pub fn validate(&self) -> Result<(), String> {
        let scalars = self.weights.named().into_iter().map(|(n, w)| (n.to_string(), w)).chain([
            ("default_archetype_weight".to_string(), self.default_archetype_weight),
            ("default_combo_weight".to_string(), self.default_combo_weight),
            ("default_format_weight".to_string(), self.default_format_weight),
            ("mana_untap_bonus".to_string(), self.mana_untap_bonus),
            ("tutor_recursion_bonus".to_string(), self.tutor_recursion_bonus),
        ]);
        let tables = [
            ("archetype_weights", &self.archetype_weights),
            ("combo_weights", &self.combo_weights),
            ("format_weights", &self.format_weights),
        ]
        .into_iter()
        .flat_map(|(table, map)| map.iter().map(move |(k, w)| (format!("{}.{}", table, k), *w)));

        for (name, weight) in scalars.chain(tables) {
            if !weight.is_finite() || weight < 0.0 {
                return Err(format!("{} must be a non-negative number, got {}", name, weight));
            }
        }

        if let Some(unknown) = self
            .archetype_weights
            .keys()
            .find(|k| ArchetypeTag::parse(k).is_none())
        {
            return Err(format!("Unknown archetype in archetype_weights: {}", unknown));
        }
        if let Some(unknown) = self.combo_weights.keys().find(|k| ComboTag::parse(k).is_none()) {
            return Err(format!("Unknown combo tag in combo_weights: {}", unknown));
        }

        Ok(())
    }

    /// Points for a shared archetype tag
    pub fn archetype_weight(&self, tag: ArchetypeTag) -> f64 {
        self.archetype_weights
            .get(tag.as_str())
            .copied()
            .unwrap_or(self.default_archetype_weight)
    }

    /// Points for a shared combo tag
    pub fn combo_weight(&self, tag: ComboTag) -> f64 {
        self.combo_weights
            .get(tag.as_str())
            .copied()
            .unwrap_or(self.default_combo_weight)
    }

    /// Points for a shared legal format
    pub fn format_weight(&self, format: &str) -> f64 {
        self.format_weights
            .get(format)
            .copied()
            .unwrap_or(self.default_format_weight)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
