//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod create_ballot;
pub mod create_option;
pub mod delete_option;
pub mod get_consensus;
pub mod get_suggestions;
pub mod record_vote;
pub mod rooms;
pub(crate) mod shared;
pub mod votes;

#[cfg(test)]
pub(crate) mod test_support;
