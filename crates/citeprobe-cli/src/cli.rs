//! CLI command definitions and argument parsing.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Citeprobe - synthesize citation queries for reagents and benchmark them.
#[derive(Debug, Parser)]
#[command(name = "citeprobe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CITEPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one value per line)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search and score one catalog entity against its ground truth
    Evaluate(EvaluateArgs),

    /// Search and score every catalog entity
    EvaluateAll,

    /// Search for an entity given on the command line
    Search(SearchArgs),

    /// Print the queries synthesized for an entity
    Synthesize(SynthesizeArgs),

    /// Discover citation patterns in an entity's known-positive documents
    Discover(DiscoverArgs),

    /// List the entity catalog
    Catalog,
}

/// Arguments for the evaluate command.
#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// 1-based catalog index
    #[arg(short, long, default_value = "1")]
    pub index: usize,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Entity as MANUFACTURER,SKU,TARGET or MANUFACTURER,SKU,CLONE,TARGET
    pub identifier: String,
}

/// Arguments for the synthesize command.
#[derive(Debug, Parser)]
#[command(group(ArgGroup::new("entity").required(true).args(["identifier", "index"])))]
pub struct SynthesizeArgs {
    /// Entity as MANUFACTURER,SKU,TARGET or MANUFACTURER,SKU,CLONE,TARGET
    pub identifier: Option<String>,

    /// 1-based catalog index
    #[arg(short, long)]
    pub index: Option<usize>,
}

/// Arguments for the discover command.
#[derive(Debug, Parser)]
pub struct DiscoverArgs {
    /// 1-based catalog index
    #[arg(short, long)]
    pub index: usize,

    /// Skip this many documents before fetching
    #[arg(short, long, default_value = "0")]
    pub jump_to: usize,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_defaults_to_first_entity() {
        let cli = Cli::parse_from(["citeprobe", "evaluate"]);
        match cli.command {
            Command::Evaluate(args) => assert_eq!(args.index, 1),
            _ => panic!("Expected Evaluate command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["citeprobe", "catalog", "--format", "json", "--no-color", "-vv"]);
        assert!(matches!(cli.command, Command::Catalog));
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(cli.no_color);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_search_identifier() {
        let cli = Cli::parse_from(["citeprobe", "search", "BioLegend,100401,GK1.5,CD4"]);
        match cli.command {
            Command::Search(args) => assert_eq!(args.identifier, "BioLegend,100401,GK1.5,CD4"),
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_synthesize_requires_an_entity() {
        assert!(Cli::try_parse_from(["citeprobe", "synthesize"]).is_err());
        assert!(Cli::try_parse_from(["citeprobe", "synthesize", "A,B,C", "-i", "2"]).is_err());

        let cli = Cli::parse_from(["citeprobe", "synthesize", "-i", "3"]);
        match cli.command {
            Command::Synthesize(args) => {
                assert_eq!(args.index, Some(3));
                assert!(args.identifier.is_none());
            }
            _ => panic!("Expected Synthesize command"),
        }
    }

    #[test]
    fn test_discover_jump_to() {
        let cli = Cli::parse_from(["citeprobe", "discover", "-i", "2", "--jump-to", "5"]);
        match cli.command {
            Command::Discover(args) => {
                assert_eq!(args.index, 2);
                assert_eq!(args.jump_to, 5);
            }
            _ => panic!("Expected Discover command"),
        }
    }

    #[test]
    fn test_discover_requires_index() {
        assert!(Cli::try_parse_from(["citeprobe", "discover"]).is_err());
    }
}
