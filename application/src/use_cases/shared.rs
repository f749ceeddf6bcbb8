//! Shared utilities for use cases.
//!
//! Token resolution is the same for every session-scoped request: an absent
//! or unknown token is an invalid-argument condition.

use crate::ports::voting_repository::VotingRepository;
use concord_domain::{DomainError, Room, SessionId, VotingSession};

/// Resolve a session token into the session and its room.
pub(crate) async fn resolve_session<V: VotingRepository + ?Sized>(
    voting: &V,
    token: Option<SessionId>,
) -> Result<(VotingSession, Room), DomainError> {
    let Some(id) = token else {
        return Err(DomainError::invalid_argument("Token is required"));
    };

    let session = voting.get_session(id).await.map_err(|e| match e {
        DomainError::NotFound { .. } => {
            DomainError::invalid_argument(format!("Invalid token: {}", id))
        }
        other => other,
    })?;
    let room = voting.get_room(session.room).await?;

    Ok((session, room))
}
