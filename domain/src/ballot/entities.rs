//! Ballot domain entities
//!
//! Plain records owned by the voting store. The engine only ever holds them
//! by id; these structs are the snapshots the store hands out.

use crate::core::error::DomainError;
use crate::core::ids::{BallotId, OptionId, RoomId, SessionId};
use serde::{Deserialize, Serialize};

/// A named collection of options (Entity)
///
/// Immutable once created; labels are unique across ballots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub id: BallotId,
    pub label: String,
}

/// A single choice within a ballot (Entity)
///
/// Labels are unique within the owning ballot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotOption {
    pub id: OptionId,
    pub ballot: BallotId,
    pub label: String,
}

/// Groups sessions voting on the same ballot (Entity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub ballot: BallotId,
}

/// One participant's voting context inside a room (Entity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingSession {
    pub id: SessionId,
    pub room: RoomId,
}

/// Validate a ballot or option label.
///
/// Returns the trimmed label; blank labels are rejected.
pub fn validate_label(label: &str) -> Result<String, DomainError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_argument("Label must not be empty"));
    }
    Ok(trimmed.to_string())
}
