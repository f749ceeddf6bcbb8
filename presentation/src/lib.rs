//! Presentation layer for concord
//!
//! This crate contains CLI definitions, output formatters,
//! and the interactive voting interface.

pub mod cli;
pub mod config;
pub mod output;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use repl::{Flow, ReplCommand, VotingRepl};
