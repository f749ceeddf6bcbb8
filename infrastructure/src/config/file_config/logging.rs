//! Logging configuration from TOML (`[logging]` section)

use super::repl::expand_home;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Diagnostic log file; stderr when unset
    pub file: Option<String>,
    /// JSONL audit log of engine events; disabled when unset
    pub event_log: Option<String>,
}

impl FileLoggingConfig {
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.as_deref().map(expand_home)
    }

    pub fn event_log_path(&self) -> Option<PathBuf> {
        self.event_log.as_deref().map(expand_home)
    }
}
