//! CLI command definitions

use clap::{Parser, ValueEnum};
use concord_domain::ModePreference;
use std::path::PathBuf;

/// Output format for listings, suggestions and consensus
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable text
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for concord_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => concord_domain::OutputFormat::Text,
            OutputFormat::Json => concord_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for concord
#[derive(Parser, Debug)]
#[command(name = "concord")]
#[command(author, version, about = "Group voting with learned option correlations")]
#[command(long_about = r#"
Concord runs yes/no votes on the options of a ballot. Everyone in a room
answers the suggestions one by one; the engine learns which options go
together and proposes what each participant is likely to approve next.

Suggestion modes:
  suggest   Options you are most likely to approve
  explore   Options whose answer tells the most about your taste
  mixed     Alternate explore / suggest, starting with explore

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./concord.toml      Project-level config
3. ~/.config/concord/config.toml   Global config

Example:
  concord --ballot Lunch
  concord --ballot Lunch --mode suggest --limit 3
  concord --list -o json
"#)]
pub struct Cli {
    /// Ballot to vote on (prompted for when several exist)
    #[arg(short, long, value_name = "LABEL")]
    pub ballot: Option<String>,

    /// Suggestion mode: suggest, explore or mixed
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<ModePreference>,

    /// Maximum suggestions listed by /suggest and /explore (0 = all)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Print the configured ballots and exit
    #[arg(long)]
    pub list: bool,

    /// Output format (overrides `[output] format`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the welcome banner and hints
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
