//! Session-scoped vote listing and deletion
//!
//! Votes are only visible to the session that cast them: asking for another
//! session's vote looks exactly like asking for a vote that does not exist.
//! Deleting a vote leaves the correlation rows as they are.

use crate::locks::LockRegistry;
use crate::ports::vote_event_logger::{VoteEvent, VoteEventLogger};
use crate::ports::voting_repository::VotingRepository;
use crate::use_cases::shared::resolve_session;
use concord_domain::{DomainError, SessionId, UserVote, VoteId};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Use case for listing a session's votes
pub struct ListVotesUseCase<V: VotingRepository + 'static> {
    voting: Arc<V>,
}

impl<V: VotingRepository + 'static> ListVotesUseCase<V> {
    pub fn new(voting: Arc<V>) -> Self {
        Self { voting }
    }

    pub async fn execute(&self, token: Option<SessionId>) -> Result<Vec<UserVote>, DomainError> {
        let (session, _) = resolve_session(self.voting.as_ref(), token).await?;
        self.voting.votes_by_session(session.id).await
    }

    /// One vote, scoped to the session
    pub async fn get(&self, token: Option<SessionId>, id: VoteId) -> Result<UserVote, DomainError> {
        let (session, _) = resolve_session(self.voting.as_ref(), token).await?;
        owned_vote(self.voting.as_ref(), session.id, id).await
    }
}

/// Use case for withdrawing a vote
pub struct DeleteVoteUseCase<V: VotingRepository + 'static> {
    voting: Arc<V>,
    locks: Arc<LockRegistry>,
    events: Arc<dyn VoteEventLogger>,
}

impl<V: VotingRepository + 'static> DeleteVoteUseCase<V> {
    pub fn new(voting: Arc<V>, locks: Arc<LockRegistry>, events: Arc<dyn VoteEventLogger>) -> Self {
        Self {
            voting,
            locks,
            events,
        }
    }

    pub async fn execute(
        &self,
        token: Option<SessionId>,
        id: VoteId,
    ) -> Result<UserVote, DomainError> {
        let (session, _) = resolve_session(self.voting.as_ref(), token).await?;
        let _session = self.locks.lock_session(session.id).await;

        owned_vote(self.voting.as_ref(), session.id, id).await?;
        let removed = self.voting.delete_vote(id).await?;

        info!(
            "Session {} withdrew its vote on option {}",
            session.id, removed.option
        );
        self.events.log(VoteEvent::new(
            "vote_deleted",
            json!({
                "session": session.id,
                "option": removed.option,
                "polarity": removed.polarity,
            }),
        ));

        Ok(removed)
    }
}

async fn owned_vote<V: VotingRepository + ?Sized>(
    voting: &V,
    session: SessionId,
    id: VoteId,
) -> Result<UserVote, DomainError> {
    let vote = voting.get_vote(id).await?;
    if vote.session != session {
        return Err(DomainError::not_found("vote", id));
    }
    Ok(vote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::vote_event_logger::NoEventLogger;
    use crate::use_cases::test_support::MemoryVoting;

    async fn two_sessions(voting: &MemoryVoting) -> (SessionId, SessionId, UserVote) {
        let ballot = voting.create_ballot("Films").await.unwrap();
        let option = voting.create_option(ballot.id, "Alien").await.unwrap();
        let room = voting.create_room(ballot.id).await.unwrap();
        let first = voting.create_session(room.id).await.unwrap();
        let second = voting.create_session(room.id).await.unwrap();
        let vote = *voting
            .record_vote(first.id, option.id, true)
            .await
            .unwrap()
            .vote();
        (first.id, second.id, vote)
    }

    #[tokio::test]
    async fn test_list_only_own_votes() {
        let voting = Arc::new(MemoryVoting::default());
        let (first, second, vote) = two_sessions(&voting).await;
        let list = ListVotesUseCase::new(voting);

        assert_eq!(list.execute(Some(first)).await.unwrap(), vec![vote]);
        assert!(list.execute(Some(second)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_with_foreign_token_is_not_found() {
        let voting = Arc::new(MemoryVoting::default());
        let (first, second, vote) = two_sessions(&voting).await;
        let list = ListVotesUseCase::new(voting);

        assert_eq!(list.get(Some(first), vote.id).await.unwrap(), vote);
        assert!(list.get(Some(second), vote.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_with_foreign_token_keeps_vote() {
        let voting = Arc::new(MemoryVoting::default());
        let (first, second, vote) = two_sessions(&voting).await;
        let delete = DeleteVoteUseCase::new(
            voting.clone(),
            Arc::new(LockRegistry::new()),
            Arc::new(NoEventLogger),
        );

        let err = delete.execute(Some(second), vote.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(voting.get_vote(vote.id).await.is_ok());

        delete.execute(Some(first), vote.id).await.unwrap();
        assert!(voting.get_vote(vote.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_without_token_is_invalid_argument() {
        let voting = Arc::new(MemoryVoting::default());
        let (_, _, vote) = two_sessions(&voting).await;
        let delete = DeleteVoteUseCase::new(
            voting,
            Arc::new(LockRegistry::new()),
            Arc::new(NoEventLogger),
        );

        let err = delete.execute(None, vote.id).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
