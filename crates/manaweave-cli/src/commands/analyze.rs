//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::resolve_card;
use crate::error::Result;
use crate::output::Formatter;
use manaweave_domain::traits::CardCatalog;
use manaweave_domain::CardRecord;
use manaweave_extractor::FeatureExtractor;
use manaweave_store::SqliteStore;
use tracing::{debug, info};

/// Execute the analyze command.
pub async fn execute_analyze(
    args: AnalyzeArgs,
    store: &mut SqliteStore,
    extractor: &FeatureExtractor,
    formatter: &Formatter,
) -> Result<()> {
    let cards = match &args.card {
        Some(query) => vec![resolve_card(store, query)?],
        None => store.all_cards()?,
    };

    // A single named card is always re-analyzed
    let force = args.force || args.card.is_some();
    let analyzed = analyze_cards(store, extractor, &cards, force)?;

    if analyzed == 0 {
        println!("{}", formatter.info("Every card already has features"));
    } else {
        println!("{}", formatter.success(&format!("Analyzed {} card(s)", analyzed)));
    }

    Ok(())
}

/// Extract and store features, skipping analyzed cards unless `force`.
pub fn analyze_cards(
    store: &mut SqliteStore,
    extractor: &FeatureExtractor,
    cards: &[CardRecord],
    force: bool,
) -> Result<usize> {
    let mut analyzed = 0;
    for card in cards {
        if !force && store.load_features(card.id)?.is_some() {
            debug!("Card {} already analyzed", card.id);
            continue;
        }
        let features = extractor.extract_card(card);
        store.save_features(card.id, &features)?;
        analyzed += 1;
    }
    info!("Analyzed {} of {} cards", analyzed, cards.len());
    Ok(analyzed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use manaweave_domain::CardId;

    #[test]
    fn test_skips_analyzed_cards_unless_forced() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        let cards = vec![
            CardRecord::new(CardId::from_value(1), "Llanowar Elves")
                .with_text("{T}: Add {G}."),
            CardRecord::new(CardId::from_value(2), "Shock")
                .with_text("Shock deals 2 damage to any target."),
        ];
        for card in &cards {
            store.upsert_card(card).unwrap();
        }
        let extractor = FeatureExtractor::default();

        assert_eq!(analyze_cards(&mut store, &extractor, &cards, false).unwrap(), 2);
        assert_eq!(analyze_cards(&mut store, &extractor, &cards, false).unwrap(), 0);
        assert_eq!(analyze_cards(&mut store, &extractor, &cards, true).unwrap(), 2);
        assert_eq!(store.analyzed_count().unwrap(), 2);
    }
}
