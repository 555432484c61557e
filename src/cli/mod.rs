//! Argument parsing for the `scout` binary; rendering lives in [`output`].

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scout - multi-agent market intelligence
///
/// Routes a query through web research, report writing and synthesis, and
/// prints a structured answer with tables and charts.
#[derive(Parser, Debug)]
#[command(
    name = "scout",
    version,
    about = "Scout - multi-agent market intelligence pipeline",
    long_about = "Gathers signals from startup directories, launch platforms, hackathon galleries\n\
                  and forums, summarizes them, and synthesizes a structured market report.",
    after_help = "EXAMPLES:\n    \
                  scout ask \"AI bookkeeping for freelancers\"      # Full pipeline\n    \
                  scout ask \"pet insurance\" --json                # Machine-readable output\n    \
                  scout search \"no-code CRM\" --type social_signal  # Connectors only\n    \
                  scout --config my.toml ask \"...\"                # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "scout.toml", global = true)]
    pub config: PathBuf,

    /// Debug logging and the per-stage trace
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline for a query
    Ask {
        /// The market question to investigate
        query: String,

        /// Print the final output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run only the connectors and print the gathered documents as JSON
    Search {
        /// Search query passed to every connector
        query: String,

        /// Maximum results per source (defaults to connectors.default_limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Keep only documents of these types (repeatable)
        #[arg(short = 't', long = "type")]
        types: Vec<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["scout", "ask", "pet insurance", "--json"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("scout.toml"));
        match cli.command {
            Commands::Ask { query, json } => {
                assert_eq!(query, "pet insurance");
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_with_types() {
        let cli = Cli::try_parse_from([
            "scout", "--verbose", "search", "crm", "-l", "3", "-t", "social_signal", "--type",
            "supply_signal",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Search { query, limit, types } => {
                assert_eq!(query, "crm");
                assert_eq!(limit, Some(3));
                assert_eq!(types, vec!["social_signal", "supply_signal"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_query_is_required() {
        assert!(Cli::try_parse_from(["scout", "ask"]).is_err());
    }
}
