//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod ballots;
mod logging;
mod output;
mod repl;
mod suggestions;

pub use ballots::{FileBallotConfig, validate_ballots};
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;
pub use suggestions::FileSuggestionsConfig;

use concord_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Suggestion settings
    pub suggestions: FileSuggestionsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
    /// Ballots created at start-up
    pub ballots: Vec<FileBallotConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks the suggestion mode and the seed ballots' labels.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.suggestions.parse_default_mode().1);
        issues.extend(validate_ballots(&self.ballots));
        issues
    }
}
