//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use manaweave_graph::AnchorFocus;
use std::path::PathBuf;

/// Manaweave - Card synergy analysis for Magic: The Gathering collections.
#[derive(Debug, Parser)]
#[command(name = "manaweave")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MANAWEAVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file path
    #[arg(long, global = true, env = "MANAWEAVE_DB")]
    pub db: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import cards from a JSON array of card records
    Import(ImportArgs),

    /// Extract features for imported cards
    Analyze(AnalyzeArgs),

    /// Score every pair of analyzed cards and store the results
    Compute(ComputeArgs),

    /// Score two cards and explain the result
    Score(ScoreArgs),

    /// Show the strongest stored synergies
    Top(TopArgs),

    /// Show a card and its best stored partners
    Card(CardArgs),

    /// Show stored synergies ranked by one score component
    Filter(FilterArgs),

    /// Rank every analyzed card against one card without storing
    Candidates(CandidatesArgs),

    /// List a card's neighbors in the synergy graph
    Neighbors(NeighborsArgs),

    /// Find groups of cards that all pair strongly with each other
    Clusters(ClustersArgs),

    /// Find cards with many strong partners
    Hubs(HubsArgs),

    /// Find connected groups of strongly paired cards
    Cores(CoresArgs),

    /// Find cards recurring among the strongest synergies
    Anchors(AnchorsArgs),

    /// Show collection and graph statistics
    Status,

    /// Remove every stored synergy
    Reset(ResetArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file with an array of card records
    pub file: Option<PathBuf>,

    /// Read the card records from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Extract features for the imported cards right away
    #[arg(long)]
    pub analyze: bool,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Only analyze this card (id or name)
    #[arg(long)]
    pub card: Option<String>,

    /// Re-analyze cards that already have features
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the compute command.
#[derive(Debug, Parser)]
pub struct ComputeArgs {
    /// Scores below this total are not stored
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Scored pairs per committed batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Rescore pairs that already have a stored synergy
    #[arg(long)]
    pub recompute: bool,

    /// Score pairs on a single thread
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    /// First card (id or name)
    pub first: String,

    /// Second card (id or name)
    pub second: String,

    /// Store the score
    #[arg(long)]
    pub save: bool,
}

/// Arguments for the top command.
#[derive(Debug, Parser)]
pub struct TopArgs {
    /// Maximum number of synergies
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Minimum total score
    #[arg(short, long, default_value = "0")]
    pub min_score: f64,
}

/// Arguments for the card command.
#[derive(Debug, Parser)]
pub struct CardArgs {
    /// Card id or name
    pub card: String,

    /// Maximum number of partners
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Minimum total score
    #[arg(short, long, default_value = "0")]
    pub min_score: f64,

    /// Print the extracted feature set
    #[arg(long)]
    pub features: bool,
}

/// Arguments for the filter command.
#[derive(Debug, Parser)]
pub struct FilterArgs {
    /// Score field: total, tribal, color, keyword, archetype, combo, type,
    /// mana_curve or format
    pub field: String,

    /// Minimum value of the field
    #[arg(short, long, default_value = "5")]
    pub min_score: f64,

    /// Maximum number of synergies
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the candidates command.
#[derive(Debug, Parser)]
pub struct CandidatesArgs {
    /// Card id or name
    pub card: String,

    /// Minimum total score
    #[arg(short, long, default_value = "10")]
    pub threshold: f64,

    /// Maximum number of candidates
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the neighbors command.
#[derive(Debug, Parser)]
pub struct NeighborsArgs {
    /// Card id or name
    pub card: String,

    /// Minimum edge total
    #[arg(short, long, default_value = "15")]
    pub min_score: f64,
}

/// Arguments for the clusters command.
#[derive(Debug, Parser)]
pub struct ClustersArgs {
    /// Minimum edge total inside a cluster
    #[arg(short, long)]
    pub min_score: Option<f64>,

    /// Minimum cluster size
    #[arg(long)]
    pub min_size: Option<usize>,
}

/// Arguments for the hubs command.
#[derive(Debug, Parser)]
pub struct HubsArgs {
    /// Minimum edge total
    #[arg(short, long)]
    pub min_score: Option<f64>,

    /// Minimum number of incident edges
    #[arg(long)]
    pub min_edges: Option<usize>,
}

/// Arguments for the cores command.
#[derive(Debug, Parser)]
pub struct CoresArgs {
    /// Minimum edge total inside a core
    #[arg(short, long)]
    pub min_score: Option<f64>,

    /// Minimum core size
    #[arg(long)]
    pub min_size: Option<usize>,
}

/// Arguments for the anchors command.
#[derive(Debug, Parser)]
pub struct AnchorsArgs {
    /// Restrict to tribal, combo or control synergies
    #[arg(long)]
    pub focus: Option<AnchorFocus>,

    /// Minimum edge total
    #[arg(short, long)]
    pub min_score: Option<f64>,

    /// Maximum number of anchors
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the reset command.
#[derive(Debug, Parser)]
pub struct ResetArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "manaweave",
            "--db",
            "cards.db",
            "-vv",
            "--no-color",
            "status",
            "--format",
            "json",
        ]);
        assert_eq!(cli.db, Some(PathBuf::from("cards.db")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Command::Status));
    }

    #[test]
    fn test_compute_command() {
        let cli = Cli::parse_from([
            "manaweave",
            "compute",
            "--min-score",
            "2.5",
            "--batch-size",
            "500",
            "--recompute",
        ]);
        match cli.command {
            Command::Compute(args) => {
                assert_eq!(args.min_score, Some(2.5));
                assert_eq!(args.batch_size, Some(500));
                assert!(args.recompute);
                assert!(!args.sequential);
            }
            _ => panic!("Expected Compute command"),
        }
    }

    #[test]
    fn test_score_command() {
        let cli = Cli::parse_from(["manaweave", "score", "Goblin Guide", "42", "--save"]);
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.first, "Goblin Guide");
                assert_eq!(args.second, "42");
                assert!(args.save);
            }
            _ => panic!("Expected Score command"),
        }
    }

    #[test]
    fn test_anchors_focus() {
        let cli = Cli::parse_from(["manaweave", "anchors", "--focus", "combo"]);
        match cli.command {
            Command::Anchors(args) => assert_eq!(args.focus, Some(AnchorFocus::Combo)),
            _ => panic!("Expected Anchors command"),
        }

        let bad = Cli::try_parse_from(["manaweave", "anchors", "--focus", "aggro"]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_format_conversion() {
        assert_eq!(OutputFormat::from(CliFormat::Quiet), OutputFormat::Quiet);
        assert_eq!(OutputFormat::from(CliFormat::Table), OutputFormat::Table);
    }
}
