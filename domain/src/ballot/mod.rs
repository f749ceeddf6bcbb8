//! Ballot domain.
//!
//! - [`entities`]: ballots, options, rooms and sessions
//! - [`vote`]: user votes, vote-write outcomes and the per-session vote lookup

pub mod entities;
pub mod vote;
