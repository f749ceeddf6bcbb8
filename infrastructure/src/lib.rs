//! Infrastructure layer for concord
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileBallotConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileReplConfig, FileSuggestionsConfig,
};
pub use logging::JsonlVoteEventLogger;
pub use store::{InMemoryCorrelationStore, InMemoryVotingStore};
