//! Configuration file loading for concord
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CONCORD_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./concord.toml` or `./.concord.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/concord/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileBallotConfig, FileConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileReplConfig, FileSuggestionsConfig,
};
pub use loader::ConfigLoader;
