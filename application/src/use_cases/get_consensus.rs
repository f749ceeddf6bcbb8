//! Get Consensus use case

use crate::locks::LockRegistry;
use crate::ports::voting_repository::VotingRepository;
use crate::use_cases::shared::resolve_session;
use concord_domain::{ConsensusEntry, DomainError, OptionId, SessionId, detect_consensus};
use std::sync::Arc;
use tracing::debug;

/// Use case for listing the options every session in the room approved
pub struct GetConsensusUseCase<V: VotingRepository + 'static> {
    voting: Arc<V>,
    locks: Arc<LockRegistry>,
}

impl<V: VotingRepository + 'static> GetConsensusUseCase<V> {
    pub fn new(voting: Arc<V>, locks: Arc<LockRegistry>) -> Self {
        Self { voting, locks }
    }

    pub async fn execute(&self, token: Option<SessionId>) -> Result<Vec<ConsensusEntry>, DomainError> {
        let (session, room) = resolve_session(self.voting.as_ref(), token).await?;
        let _ballot = self.locks.read_ballot(room.ballot).await;

        let options: Vec<OptionId> = self
            .voting
            .options_in_ballot(room.ballot)
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();
        let sessions: Vec<SessionId> = self
            .voting
            .sessions_in_room(room.id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let votes = self.voting.votes_in_room(room.id).await?;

        let consensus = detect_consensus(&options, &sessions, &votes);
        debug!(
            "Room {} (asked by session {}): {} of {} options agreed by {} sessions",
            room.id,
            session.id,
            consensus.len(),
            options.len(),
            sessions.len()
        );
        Ok(consensus)
    }
}
