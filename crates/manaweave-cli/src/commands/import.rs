//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use manaweave_domain::traits::CardCatalog;
use manaweave_domain::CardRecord;
use manaweave_extractor::FeatureExtractor;
use manaweave_store::SqliteStore;
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use tracing::{debug, warn};

/// Execute the import command.
pub async fn execute_import(
    args: ImportArgs,
    store: &mut SqliteStore,
    extractor: &FeatureExtractor,
    formatter: &Formatter,
) -> Result<()> {
    // Read cards from file or stdin
    let json_data = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = args.file {
        fs::read_to_string(file_path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either a file or --stdin".to_string(),
        ));
    };

    let cards = parse_cards(&json_data)?;
    let analyzer = args.analyze.then_some(extractor);
    let (imported, analyzed) = import_cards(store, &cards, analyzer)?;

    println!("{}", formatter.success(&format!("Imported {} card(s)", imported)));
    if args.analyze {
        println!("{}", formatter.success(&format!("Analyzed {} card(s)", analyzed)));
    }

    Ok(())
}

/// Parse a JSON array of card records, rejecting an empty array.
pub fn parse_cards(json_data: &str) -> Result<Vec<CardRecord>> {
    let cards: Vec<CardRecord> = serde_json::from_str(json_data)?;
    if cards.is_empty() {
        return Err(CliError::InvalidInput("No cards provided".to_string()));
    }
    Ok(cards)
}

/// Upsert cards, extracting features as they go when given an extractor.
///
/// Returns `(imported, analyzed)`. A card id repeated in the input is
/// imported once per occurrence; the last occurrence wins.
pub fn import_cards(
    store: &mut SqliteStore,
    cards: &[CardRecord],
    extractor: Option<&FeatureExtractor>,
) -> Result<(usize, usize)> {
    let mut seen = BTreeSet::new();
    let mut analyzed = 0;

    for card in cards {
        if !seen.insert(card.id) {
            warn!("Card {} appears more than once; keeping the last record", card.id);
        }
        if card.name.trim().is_empty() {
            warn!("Card {} has an empty name", card.id);
        }

        store.upsert_card(card)?;
        if let Some(extractor) = extractor {
            let features = extractor.extract_card(card);
            store.save_features(card.id, &features)?;
            analyzed += 1;
        }
        debug!("Imported card {} ({})", card.id, card.name);
    }

    Ok((cards.len(), analyzed))
}
