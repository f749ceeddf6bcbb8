//! Presentation-level configuration
//!
//! Resolved settings for output rendering and REPL behavior. The binary
//! builds these from the config file with command line overrides applied.

use concord_domain::{ModePreference, OutputFormat};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    /// Mode used to pick the next option to vote on
    pub mode: ModePreference,
    /// Rows shown by `/suggest` and `/explore` (0 = all)
    pub limit: usize,
    /// Path to history file; history is not kept when unset
    pub history_file: Option<PathBuf>,
    /// Print the welcome banner and hints
    pub show_hints: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            mode: ModePreference::default(),
            limit: 10,
            history_file: None,
            show_hints: true,
        }
    }
}
