//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use sensing_domain::OutputFormat;
use std::path::PathBuf;

/// CLI arguments for node-sensing
#[derive(Parser, Debug)]
#[command(name = "node-sensing")]
#[command(
    author,
    version,
    about = "Sense the current state of graph nodes with consensus validation"
)]
#[command(long_about = r#"
node-sensing fills in the current state of each entity in a causal graph.

For every entity it tries, in order:
1. A direct market quote when the label maps to a known symbol
2. The routing rule for the entity type (structured APIs, news search)
3. News search in two attempts: whitelisted domains first, then the open
   web, where a value is only accepted when 3 independent domains agree

Configuration files are loaded from (in priority order):
1. SENSING_<SECTION>__<KEY>   Environment
2. --config <path>            Explicit config file
3. ./sensing.toml             Project-level config
4. ~/.config/node-sensing/config.toml   Global config

Example:
  node-sensing enrich graph.json
  node-sensing enrich graph.json -o json > enriched.json
  node-sensing -v enrich graph.json --concurrency 2
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enrich every entity in a JSON file with its current state
    Enrich(EnrichArgs),
}

#[derive(Args, Debug)]
pub struct EnrichArgs {
    /// Entity file: a JSON array, or an object with `nodes` or `entities`
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output format: full, summary or json
    #[arg(short, long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Maximum entities enriched in parallel
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Sources file (whitelist, routing, symbols)
    #[arg(long, value_name = "PATH")]
    pub sources: Option<PathBuf>,

    /// Skip the direct quote strategy
    #[arg(long)]
    pub no_quotes: bool,

    /// Write the enriched entities as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub write: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_enrich() {
        let cli = Cli::try_parse_from([
            "node-sensing",
            "-vv",
            "enrich",
            "graph.json",
            "--output",
            "json",
            "--concurrency",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Some(Command::Enrich(args)) = cli.command else {
            panic!("expected enrich");
        };
        assert_eq!(args.input, PathBuf::from("graph.json"));
        assert_eq!(args.output, Some(OutputFormat::Json));
        assert_eq!(args.concurrency, Some(2));
        assert!(!args.no_quotes);
    }

    #[test]
    fn test_invalid_output_format_is_rejected() {
        assert!(
            Cli::try_parse_from(["node-sensing", "enrich", "g.json", "-o", "synthesis"]).is_err()
        );
    }

    #[test]
    fn test_show_config_without_command() {
        let cli = Cli::try_parse_from(["node-sensing", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
