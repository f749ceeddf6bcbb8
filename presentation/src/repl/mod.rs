//! Interactive voting module
//!
//! Provides a readline-based interface where participants answer
//! suggestions one option at a time.

mod command;
mod voting_repl;

pub use command::ReplCommand;
pub use voting_repl::{Flow, VotingRepl};
