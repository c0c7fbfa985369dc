//! Core FeatureExtractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::mana::{parse_mana_cost, symbols, ManaSymbol};
use crate::phrases::{named_entities, noun_phrases};
use crate::tags::{archetype_tags, combo_tags};
use crate::tokenizer::Tokens;
use crate::type_line::TypeLine;
use crate::vocabulary::{ABILITY_KEYWORDS, ACTIONS, COUNTERS, MANA_WORDS, ZONES};
use manaweave_domain::traits::FeatureSource;
use manaweave_domain::{CardMetadata, CardRecord, ColorSet, FeatureSet, StatValue};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Turns oracle text plus card metadata into a [`FeatureSet`]
///
/// Extraction is deterministic and never fails: missing text or metadata
/// just leaves the corresponding features empty.
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    config: ExtractorConfig,
}

impl FeatureExtractor {
    /// Create a new FeatureExtractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract features from oracle text and metadata
    pub fn extract(&self, oracle_text: Option<&str>, metadata: Option<&CardMetadata>) -> FeatureSet {
        let text = self.bounded_text(oracle_text.unwrap_or_default());
        let tokens = Tokens::new(text);

        let mut features = FeatureSet {
            text: text.to_lowercase(),
            ..Default::default()
        };

        features.keywords = collect(tokens.find_all(ABILITY_KEYWORDS));
        features.actions = collect(tokens.find_all(ACTIONS));
        features.zones = collect(tokens.find_all(ZONES));
        features.mana_references = collect(tokens.find_all(MANA_WORDS));
        features.mana_references.extend(symbol_references(text));
        features.counters = COUNTERS
            .iter()
            .filter(|kind| tokens.has_phrase(&format!("{} counter", kind)))
            .map(|kind| kind.to_string())
            .collect();

        if let Some(metadata) = metadata {
            apply_metadata(&mut features, metadata);
        }

        features.combos = combo_tags(&features, &tokens);
        features.archetypes = archetype_tags(&features, &tokens, &features.combos);

        if self.config.extract_phrases {
            features.noun_phrases = noun_phrases(text);
            features.named_entities = named_entities(text);
        }
        if self.config.include_raw_tokens {
            features.raw_tokens = tokens.words().to_vec();
        }

        debug!(
            "Extracted {} keywords, {} archetypes, {} combo tags for '{}'",
            features.keywords.len(),
            features.archetypes.len(),
            features.combos.len(),
            features.name.as_deref().unwrap_or("<unnamed>")
        );

        features
    }

    /// Extract features for a stored card
    pub fn extract_card(&self, card: &CardRecord) -> FeatureSet {
        let mut features = self.extract(card.oracle_text.as_deref(), Some(&card.metadata));
        if features.name.is_none() {
            features.name = Some(card.name.clone());
        }
        features
    }

    /// Extract features with metadata given as Scryfall-shaped JSON
    pub fn extract_json(
        &self,
        oracle_text: Option<&str>,
        metadata_json: &str,
    ) -> Result<FeatureSet, ExtractorError> {
        let metadata: CardMetadata = serde_json::from_str(metadata_json)?;
        Ok(self.extract(oracle_text, Some(&metadata)))
    }

    fn bounded_text<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.config.max_text_length) {
            Some((cut, _)) => {
                warn!(
                    "Oracle text truncated to {} characters",
                    self.config.max_text_length
                );
                &text[..cut]
            }
            None => text,
        }
    }
}

impl FeatureSource for FeatureExtractor {
    fn features_for(&self, card: &CardRecord) -> FeatureSet {
        self.extract_card(card)
    }
}

fn collect(words: Vec<String>) -> BTreeSet<String> {
    words.into_iter().collect()
}

/// Color names (plus hybrid/phyrexian/colorless) of `{..}` symbols in text
fn symbol_references(text: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    for symbol in symbols(text).filter_map(ManaSymbol::classify) {
        if let Some(color) = symbol.color() {
            found.insert(color.name().to_string());
        }
        match symbol {
            ManaSymbol::Colorless => {
                found.insert("colorless".to_string());
            }
            ManaSymbol::Hybrid(_) => {
                found.insert("hybrid".to_string());
            }
            ManaSymbol::Phyrexian(_) => {
                found.insert("phyrexian".to_string());
            }
            _ => {}
        }
    }
    found
}

fn apply_metadata(features: &mut FeatureSet, metadata: &CardMetadata) {
    features.name = metadata.name.clone();
    features
        .keywords
        .extend(metadata.keywords.iter().map(|k| k.trim().to_lowercase()));

    let types = TypeLine::parse(metadata.type_line.as_deref().unwrap_or_default());
    features.card_types = types.card_types;
    features.supertypes = types.supertypes;
    features.creature_types = types.creature_types;
    features.planeswalker_types = types.planeswalker_types;
    features.artifact_subtypes = types.artifact_subtypes;
    features.enchantment_subtypes = types.enchantment_subtypes;
    features.land_types = types.land_types;

    features.colors = ColorSet::from_symbols(&metadata.colors);
    features.color_identity = ColorSet::from_symbols(&metadata.color_identity);

    features.mana = parse_mana_cost(metadata.mana_cost.as_deref().unwrap_or_default());
    features.mana_value = match metadata.cmc {
        Some(cmc) if cmc.is_finite() && cmc >= 0.0 => cmc,
        _ => f64::from(features.mana.mana_value()),
    };

    features.power = metadata.power.as_deref().map(StatValue::parse);
    features.toughness = metadata.toughness.as_deref().map(StatValue::parse);
    features.loyalty = metadata.loyalty.as_deref().map(StatValue::parse);

    features.legal_formats = metadata
        .legalities
        .iter()
        .filter(|(_, status)| matches!(status.to_lowercase().as_str(), "legal" | "restricted"))
        .map(|(format, _)| format.to_lowercase())
        .collect();

    features.rarity = metadata.rarity.as_ref().map(|r| r.to_lowercase());
    features.set_code = metadata.set_code.as_ref().map(|s| s.to_lowercase());
}
