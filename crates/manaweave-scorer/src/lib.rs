//! Manaweave SynergyScorer
//!
//! Combines two feature sets into a multi-dimensional synergy score with
//! an explanation trail.
//!
//! The scorer runs eight independent calculators, each returning
//! non-negative points and `category:detail` explanations:
//! - **Tribal**: shared creature types, and creature types named in the other card's text
//! - **Color**: exact color match, shared colors, identity subset, both multicolor
//! - **Keyword**: shared keywords, complementary keyword pairs
//! - **Archetype**: shared archetype tags, weighted per tag
//! - **Combo**: shared combo tags plus cross-card combo patterns
//! - **Type**: shared card types and artifact/enchantment subtypes
//! - **Mana curve**: adjacent costs and similar color intensity
//! - **Format**: shared legal formats, weighted per format
//!
//! The total is a fixed positive linear combination of the components
//! (see [`ComponentWeights`]).
//!
//! # Examples
//!
//! ```
//! use manaweave_domain::FeatureSet;
//! use manaweave_scorer::{ScorerConfig, SynergyScorer};
//!
//! let scorer = SynergyScorer::new(ScorerConfig::default()).unwrap();
//!
//! let mut guide = FeatureSet::default();
//! guide.creature_types.insert("goblin".to_string());
//! let mut king = FeatureSet::default();
//! king.creature_types.insert("goblin".to_string());
//! king.text = "other goblin creatures get +1/+1.".to_string();
//!
//! let score = scorer.score(&guide, &king);
//! assert_eq!(score.tribal, 5.0);
//! assert!(score.matches.contains(&"tribal:goblin".to_string()));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod scorer;

pub use config::{ComponentWeights, ScorerConfig};
pub use error::ScorerError;
pub use scorer::{RankedCandidate, SynergyScorer};
