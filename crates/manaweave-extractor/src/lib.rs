//! Manaweave FeatureExtractor
//!
//! Converts a card's oracle text and structured metadata into a
//! [`FeatureSet`](manaweave_domain::FeatureSet), the input of the synergy
//! scorer.
//!
//! # Overview
//!
//! Extraction is deterministic token matching against closed reference
//! vocabularies. There is no statistical model; the same card always
//! produces the same features.
//!
//! # Architecture
//!
//! ```text
//! oracle text ──► Tokens ──► keywords / actions / zones / counters ─┐
//! metadata ─────► TypeLine, mana cost, stats, legalities ───────────┼─► tag rules ─► FeatureSet
//! ```
//!
//! # Key Features
//!
//! - **Word-boundary matching**: `mills` matches `mill`, `toward` never matches `ward`
//! - **Type-line parsing**: subtypes are attributed only when the main types allow them
//! - **Mana-cost breakdown**: generic, per-color, hybrid, phyrexian and X symbols
//! - **Tag rules**: archetype and combo-potential tags from the extracted features
//! - **Graceful degradation**: absent text or metadata yields empty features, never an error
//!
//! # Example Usage
//!
//! ```
//! use manaweave_domain::{ArchetypeTag, CardMetadata};
//! use manaweave_extractor::{ExtractorConfig, FeatureExtractor};
//!
//! let extractor = FeatureExtractor::new(ExtractorConfig::default());
//!
//! let metadata = CardMetadata {
//!     type_line: Some("Instant".to_string()),
//!     mana_cost: Some("{U}{U}".to_string()),
//!     ..Default::default()
//! };
//! let features = extractor.extract(Some("Counter target spell."), Some(&metadata));
//!
//! assert!(features.actions.contains("counter"));
//! assert!(features.archetypes.contains(&ArchetypeTag::Control));
//! assert_eq!(features.mana_value, 2.0);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod mana;
mod phrases;
mod tags;
mod tokenizer;
mod type_line;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::FeatureExtractor;
pub use mana::parse_mana_cost;
pub use phrases::{named_entities, noun_phrases};
pub use tokenizer::{word_matches, Tokens};
pub use type_line::TypeLine;
