//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to history file; defaults to the user data directory
    pub history_file: Option<String>,
}

impl FileReplConfig {
    /// Resolve the history path, expanding a leading `~/`
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(raw) => Some(expand_home(raw)),
            None => dirs::data_dir().map(|d| d.join("concord").join("history.txt")),
        }
    }
}

pub(crate) fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(raw)),
        None => PathBuf::from(raw),
    }
}
