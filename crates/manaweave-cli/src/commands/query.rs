//! Stored-synergy query commands: top, card and filter.

use crate::cli::{CardArgs, FilterArgs, TopArgs};
use crate::commands::{names_for, resolve_card};
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use manaweave_domain::traits::{CardCatalog, SynergyStore};
use manaweave_domain::{ScoreField, SynergyEdge};
use manaweave_store::SqliteStore;

fn edge_names(store: &SqliteStore, edges: &[SynergyEdge]) -> Result<crate::output::CardNames> {
    names_for(
        store,
        edges.iter().flat_map(|e| [e.pair.low(), e.pair.high()]),
    )
}

/// Execute the top command.
pub async fn execute_top(
    args: TopArgs,
    store: &SqliteStore,
    limit: usize,
    formatter: &Formatter,
) -> Result<()> {
    let edges = store.top_n(args.limit.unwrap_or(limit), args.min_score)?;
    let names = edge_names(store, &edges)?;
    println!("{}", formatter.format_edges(&edges, &names)?);
    Ok(())
}

/// Execute the card command.
pub async fn execute_card(
    args: CardArgs,
    store: &SqliteStore,
    limit: usize,
    formatter: &Formatter,
) -> Result<()> {
    let card = resolve_card(store, &args.card)?;
    let edges = store.for_card(card.id, args.min_score, args.limit.unwrap_or(limit))?;
    let names = edge_names(store, &edges)?;

    if formatter.format() != OutputFormat::Quiet {
        println!("{}", formatter.format_cards(std::slice::from_ref(&card))?);
    }
    if let (OutputFormat::Table, Some(text)) = (formatter.format(), &card.oracle_text) {
        println!("{}", text);
    }

    if args.features {
        match store.load_features(card.id)? {
            Some(features) => println!("{}", serde_json::to_string_pretty(&features)?),
            None => println!("{}", formatter.warning("Card has not been analyzed")),
        }
    }

    println!("{}", formatter.format_edges(&edges, &names)?);
    Ok(())
}

/// Execute the filter command.
pub async fn execute_filter(
    args: FilterArgs,
    store: &SqliteStore,
    limit: usize,
    formatter: &Formatter,
) -> Result<()> {
    let field = parse_field(&args.field)?;
    let edges = store.filter_by_component(field, args.min_score, args.limit.unwrap_or(limit))?;
    let names = edge_names(store, &edges)?;
    println!("{}", formatter.format_edges(&edges, &names)?);
    Ok(())
}

/// Parse a score field name given on the command line.
pub fn parse_field(name: &str) -> Result<ScoreField> {
    ScoreField::parse(name).ok_or_else(|| {
        let known: Vec<&str> = std::iter::once(ScoreField::Total)
            .chain(ScoreField::COMPONENTS)
            .map(|f| f.as_str())
            .collect();
        CliError::InvalidInput(format!(
            "Unknown score field '{}' (expected one of: {})",
            name,
            known.join(", ")
        ))
    })
}
