//! Manaweave CLI - Card synergy analysis for Magic: The Gathering collections.

use clap::Parser;
use manaweave_cli::commands;
use manaweave_cli::{Cli, Command, Config, Formatter};
use manaweave_extractor::FeatureExtractor;
use manaweave_scorer::SynergyScorer;
use manaweave_store::SqliteStore;
use tracing::debug;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> manaweave_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    manaweave_cli::init_tracing(cli.verbose);

    // An explicit config file must load; the default one is created on first use
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    let db_path = config.database_path(cli.db.as_deref())?;
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    debug!("Opening database {}", db_path.display());
    let mut store = SqliteStore::new(&db_path)?;

    let extractor = FeatureExtractor::new(config.extractor.clone());
    let scorer = SynergyScorer::new(config.scorer.clone())?;
    let limit = config.settings.limit;

    match cli.command {
        Command::Import(args) => {
            commands::execute_import(args, &mut store, &extractor, &formatter).await?;
        }
        Command::Analyze(args) => {
            commands::execute_analyze(args, &mut store, &extractor, &formatter).await?;
        }
        Command::Compute(args) => {
            commands::execute_compute(args, store, &config, &formatter).await?;
        }
        Command::Score(args) => {
            commands::execute_score(args, &mut store, &extractor, &scorer, &formatter).await?;
        }
        Command::Top(args) => {
            commands::execute_top(args, &store, limit, &formatter).await?;
        }
        Command::Card(args) => {
            commands::execute_card(args, &store, limit, &formatter).await?;
        }
        Command::Filter(args) => {
            commands::execute_filter(args, &store, limit, &formatter).await?;
        }
        Command::Candidates(args) => {
            commands::execute_candidates(args, &store, &extractor, &scorer, limit, &formatter)
                .await?;
        }
        Command::Neighbors(args) => {
            commands::execute_neighbors(args, &store, &formatter).await?;
        }
        Command::Clusters(args) => {
            commands::execute_clusters(args, &store, &config.graph, &formatter).await?;
        }
        Command::Hubs(args) => {
            commands::execute_hubs(args, &store, &config.graph, &formatter).await?;
        }
        Command::Cores(args) => {
            commands::execute_cores(args, &store, &config.graph, &formatter).await?;
        }
        Command::Anchors(args) => {
            commands::execute_anchors(args, &store, &config.graph, &formatter).await?;
        }
        Command::Status => {
            commands::execute_status(&store, &formatter).await?;
        }
        Command::Reset(args) => {
            commands::execute_reset(args, &mut store, &formatter).await?;
        }
    }

    Ok(())
}
