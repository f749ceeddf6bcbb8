//! Logging infrastructure: structured engine-event logging.
//!
//! Provides [`JsonlVoteEventLogger`], a JSONL file writer that implements
//! the [`VoteEventLogger`](concord_application::VoteEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlVoteEventLogger;
