//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod correlation_repository;
pub mod vote_event_logger;
pub mod voting_repository;
