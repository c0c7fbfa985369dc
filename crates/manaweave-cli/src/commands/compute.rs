//! Compute command implementation.

use crate::cli::ComputeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use manaweave_batch::{AnalyzedCard, BatchConfig, BatchError, BatchWorker, SynergyComputer};
use manaweave_domain::traits::CardCatalog;
use manaweave_scorer::SynergyScorer;
use manaweave_store::SqliteStore;

/// Execute the compute command.
///
/// Takes ownership of the store for the duration of the run; Ctrl+C stops
/// the run after committing the pending batch.
pub async fn execute_compute(
    args: ComputeArgs,
    store: SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let cards: Vec<AnalyzedCard> = store
        .analyzed_cards()?
        .into_iter()
        .map(AnalyzedCard::from)
        .collect();

    if cards.len() < 2 {
        println!(
            "{}",
            formatter.warning("Need at least two analyzed cards; run 'manaweave analyze' first")
        );
        return Ok(());
    }

    let scorer = SynergyScorer::new(config.scorer.clone())?;
    let computer = SynergyComputer::new(batch_config(&args, &config.batch), scorer)?;
    let worker = BatchWorker::new(computer);

    println!(
        "{}",
        formatter.info(&format!("Scoring pairs of {} analyzed cards", cards.len()))
    );

    match worker.run(store, cards).await {
        Ok((_, stats)) => {
            println!("{}", formatter.format_batch_stats(&stats)?);
            if stats.cancelled {
                println!("{}", formatter.warning("Cancelled; re-run to resume"));
            }
            Ok(())
        }
        Err(BatchError::Commit { stats, message }) => {
            println!("{}", formatter.format_batch_stats(&stats)?);
            Err(BatchError::Commit { stats, message }.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Batch configuration with command-line overrides applied.
pub fn batch_config(args: &ComputeArgs, base: &BatchConfig) -> BatchConfig {
    let mut config = base.clone();
    if let Some(min_score) = args.min_score {
        config.min_score = min_score;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if args.recompute {
        config.recompute = true;
    }
    if args.sequential {
        config.parallel = false;
    }
    config
}
