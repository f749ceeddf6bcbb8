//! Domain layer for concord
//!
//! This crate contains the core voting logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Ballots and Rooms
//!
//! - **Ballot**: a named set of options
//! - **Room**: participants gathered around one ballot
//! - **Session**: one participant's yes/no votes inside a room
//!
//! ## Correlation Model
//!
//! For every ordered pair of options the engine tracks how often a session
//! that voted one way on the first option approved the second. The estimate
//! is an exponential moving average fed by each session's own votes.
//!
//! ## Suggestions
//!
//! - **Suggest**: rank un-voted options by how likely the session approves them
//! - **Explore**: rank by how much a vote would reveal about the session
//!
//! ## Consensus
//!
//! Options every session in a room approved.

pub mod ballot;
pub mod config;
pub mod consensus;
pub mod core;
pub mod correlation;
pub mod scoring;

// Re-export commonly used types
pub use ballot::{
    entities::{Ballot, BallotOption, Room, VotingSession, validate_label},
    vote::{SessionVotes, UserVote, VoteChange},
};
pub use config::{ConfigIssue, ConfigIssueCode, ModePreference, OutputFormat, Severity};
pub use consensus::{ConsensusEntry, detect_consensus};
pub use self::core::{
    error::DomainError,
    ids::{BallotId, OptionId, RoomId, SessionId, VoteId, parse_session_token},
};
pub use correlation::{
    Correlation, CorrelationKey, CorrelationTable, CorrelationUpdate, EMA_WEIGHT,
    NEUTRAL_CORRELATION, initial_keys, plan_vote_updates,
};
pub use scoring::{ScoringInput, Suggestion, SuggestionMode, score_candidates};
