//! In-memory store adapters
//!
//! Both stores have process lifetime: they start empty and vanish on exit.

mod correlation_store;
mod voting_store;

pub use correlation_store::InMemoryCorrelationStore;
pub use voting_store::InMemoryVotingStore;
