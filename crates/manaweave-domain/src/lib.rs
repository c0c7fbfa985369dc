//! Manaweave Domain Layer
//!
//! This crate holds the value types and trait seams shared by every other
//! manaweave crate. It depends only on `serde`, so feature sets and scores
//! can cross crate and process boundaries as flat records.
//!
//! ## Key Concepts
//!
//! - **FeatureSet**: everything the scorer knows about one card, derived
//!   from oracle text plus metadata
//! - **SynergyScore**: a weighted total plus eight component scores and an
//!   explanation trail
//! - **CardPair**: an unordered pair of cards, always held lower id first
//! - **SynergyEdge**: a stored score for one pair
//!
//! ## Architecture
//!
//! - Pure data and invariants only
//! - Extraction, scoring and storage live in other crates
//! - Trait definitions ([`traits::SynergyStore`], [`traits::CardCatalog`],
//!   [`traits::FeatureSource`]) for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod card;
pub mod color;
pub mod edge;
pub mod features;
pub mod mana;
pub mod score;
pub mod stat;
pub mod traits;

// Re-exports for convenience
pub use card::{CardId, CardMetadata, CardRecord};
pub use color::{Color, ColorSet};
pub use edge::{pair_count, CardPair, SynergyEdge, ANALYSIS_VERSION};
pub use features::{ArchetypeTag, ComboTag, FeatureSet};
pub use mana::ManaBreakdown;
pub use score::{ScoreField, SynergyScore};
pub use stat::{StatValue, STAR_SENTINEL, VARIABLE_SENTINEL};
