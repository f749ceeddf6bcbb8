//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: opaque identifiers for ballots, options, rooms, sessions, votes
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
