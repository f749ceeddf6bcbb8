//! Open Room / Join Room use cases
//!
//! A room gathers sessions around one ballot. Joining creates a fresh
//! session whose id doubles as the session token for every later request.

use crate::ports::voting_repository::VotingRepository;
use concord_domain::{BallotId, DomainError, Room, RoomId, VotingSession};
use std::sync::Arc;
use tracing::info;

/// Use case for opening a room on a ballot
pub struct OpenRoomUseCase<V: VotingRepository + 'static> {
    voting: Arc<V>,
}

impl<V: VotingRepository + 'static> OpenRoomUseCase<V> {
    pub fn new(voting: Arc<V>) -> Self {
        Self { voting }
    }

    pub async fn execute(&self, ballot: BallotId) -> Result<Room, DomainError> {
        let ballot = self.voting.get_ballot(ballot).await?;
        let room = self.voting.create_room(ballot.id).await?;
        info!("Opened room {} for ballot '{}'", room.id, ballot.label);
        Ok(room)
    }
}

/// Use case for joining a room as a new session
pub struct JoinRoomUseCase<V: VotingRepository + 'static> {
    voting: Arc<V>,
}

impl<V: VotingRepository + 'static> JoinRoomUseCase<V> {
    pub fn new(voting: Arc<V>) -> Self {
        Self { voting }
    }

    pub async fn execute(&self, room: RoomId) -> Result<VotingSession, DomainError> {
        let room = self.voting.get_room(room).await.map_err(|e| match e {
            DomainError::NotFound { id, .. } => {
                DomainError::invalid_argument(format!("Invalid room ID: {}", id))
            }
            other => other,
        })?;
        let session = self.voting.create_session(room.id).await?;
        info!("Session {} joined room {}", session.id, room.id);
        Ok(session)
    }
}
