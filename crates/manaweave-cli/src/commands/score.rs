//! Score and candidates command implementations.

use crate::cli::{CandidatesArgs, ScoreArgs};
use crate::commands::{names_for, resolve_card};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use manaweave_domain::traits::{CardCatalog, SynergyStore};
use manaweave_domain::{CardRecord, FeatureSet};
use manaweave_extractor::FeatureExtractor;
use manaweave_scorer::SynergyScorer;
use manaweave_store::SqliteStore;
use tracing::debug;

/// Execute the score command.
pub async fn execute_score(
    args: ScoreArgs,
    store: &mut SqliteStore,
    extractor: &FeatureExtractor,
    scorer: &SynergyScorer,
    formatter: &Formatter,
) -> Result<()> {
    let first = resolve_card(store, &args.first)?;
    let second = resolve_card(store, &args.second)?;
    if first.id == second.id {
        return Err(CliError::InvalidInput(format!(
            "Cannot score {} against itself",
            first.name
        )));
    }

    let a = features_of(store, extractor, &first)?;
    let b = features_of(store, extractor, &second)?;
    let score = scorer.score(&a, &b);

    println!("{}", formatter.format_score(&first, &second, &score)?);

    if args.save {
        store.put(first.id, second.id, &score)?;
        println!("{}", formatter.success("Score saved"));
    }

    Ok(())
}

/// Execute the candidates command.
pub async fn execute_candidates(
    args: CandidatesArgs,
    store: &SqliteStore,
    extractor: &FeatureExtractor,
    scorer: &SynergyScorer,
    limit: usize,
    formatter: &Formatter,
) -> Result<()> {
    let target = resolve_card(store, &args.card)?;
    let features = features_of(store, extractor, &target)?;
    let analyzed = store.analyzed_cards()?;

    let mut ranked = scorer.rank_candidates(
        (target.id, &features),
        analyzed.iter().map(|(id, f)| (*id, f)),
        args.threshold,
    );
    ranked.truncate(args.limit.unwrap_or(limit));

    let names = names_for(store, ranked.iter().map(|c| c.id))?;
    println!("{}", formatter.format_candidates(&ranked, &names)?);
    Ok(())
}

/// Stored features for a card, or freshly extracted ones if it has none.
///
/// Fresh features are not saved.
pub fn features_of(
    store: &SqliteStore,
    extractor: &FeatureExtractor,
    card: &CardRecord,
) -> Result<FeatureSet> {
    match store.load_features(card.id)? {
        Some(features) => Ok(features),
        None => {
            debug!("Card {} has no stored features; extracting", card.id);
            Ok(extractor.extract_card(card))
        }
    }
}
