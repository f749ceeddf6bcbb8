//! Application layer for concord
//!
//! This crate contains use cases, port definitions, and the lock registry
//! that keeps correlation updates consistent under concurrent requests.
//! It depends only on the domain layer.

pub mod engine;
pub mod locks;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use engine::VotingEngine;
pub use locks::LockRegistry;
pub use ports::{
    correlation_repository::CorrelationRepository,
    vote_event_logger::{NoEventLogger, VoteEvent, VoteEventLogger},
    voting_repository::VotingRepository,
};
pub use use_cases::create_ballot::CreateBallotUseCase;
pub use use_cases::create_option::{CreateOptionInput, CreateOptionUseCase};
pub use use_cases::delete_option::DeleteOptionUseCase;
pub use use_cases::get_consensus::GetConsensusUseCase;
pub use use_cases::get_suggestions::{GetSuggestionsInput, GetSuggestionsUseCase};
pub use use_cases::record_vote::{RecordVoteInput, RecordVoteOutput, RecordVoteUseCase};
pub use use_cases::rooms::{JoinRoomUseCase, OpenRoomUseCase};
pub use use_cases::votes::{DeleteVoteUseCase, ListVotesUseCase};
