//! Record Vote use case
//!
//! Writes a session's vote and runs the correlation update rule for it:
//!
//! 1. Resolve the session token; reject options outside the room's ballot
//! 2. Share the ballot lock, then take the session lock
//! 3. Read the session's votes and check that every row a genuine change
//!    would touch exists, so a missing row fails before anything is written
//! 4. Upsert the vote (same-polarity re-saves report `Unchanged`)
//! 5. For a genuine change, apply one EMA step per planned row
//!
//! A re-vote with the opposite polarity applies a second EMA step on top of
//! the first; earlier contributions are never reverted.

use crate::locks::LockRegistry;
use crate::ports::correlation_repository::CorrelationRepository;
use crate::ports::vote_event_logger::{VoteEvent, VoteEventLogger};
use crate::ports::voting_repository::VotingRepository;
use crate::use_cases::shared::resolve_session;
use concord_domain::{
    CorrelationKey, DomainError, OptionId, SessionId, SessionVotes, UserVote, VoteChange,
    plan_vote_updates,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input for the RecordVote use case
#[derive(Debug, Clone, Copy)]
pub struct RecordVoteInput {
    pub token: Option<SessionId>,
    pub option: OptionId,
    pub polarity: bool,
}

impl RecordVoteInput {
    pub fn new(token: SessionId, option: OptionId, polarity: bool) -> Self {
        Self {
            token: Some(token),
            option,
            polarity,
        }
    }
}

/// Output of the RecordVote use case
#[derive(Debug, Clone, Copy)]
pub struct RecordVoteOutput {
    pub change: VoteChange,
    /// Number of correlation rows that received an EMA step
    pub rows_updated: usize,
}

impl RecordVoteOutput {
    pub fn vote(&self) -> &UserVote {
        self.change.vote()
    }
}

/// Use case for recording a vote
pub struct RecordVoteUseCase<V: VotingRepository + 'static, C: CorrelationRepository + 'static> {
    voting: Arc<V>,
    correlations: Arc<C>,
    locks: Arc<LockRegistry>,
    events: Arc<dyn VoteEventLogger>,
}

impl<V: VotingRepository + 'static, C: CorrelationRepository + 'static> RecordVoteUseCase<V, C> {
    pub fn new(
        voting: Arc<V>,
        correlations: Arc<C>,
        locks: Arc<LockRegistry>,
        events: Arc<dyn VoteEventLogger>,
    ) -> Self {
        Self {
            voting,
            correlations,
            locks,
            events,
        }
    }

    pub async fn execute(&self, input: RecordVoteInput) -> Result<RecordVoteOutput, DomainError> {
        let (session, room) = resolve_session(self.voting.as_ref(), input.token).await?;

        let option = self.voting.get_option(input.option).await?;
        if option.ballot != room.ballot {
            warn!(
                "Session {} tried to vote on option {} outside ballot {}",
                session.id, option.id, room.ballot
            );
            return Err(DomainError::invalid_argument("Option not valid for token"));
        }

        let _ballot = self.locks.read_ballot(room.ballot).await;
        let _session = self.locks.lock_session(session.id).await;

        let session_votes: SessionVotes = self
            .voting
            .votes_by_session(session.id)
            .await?
            .iter()
            .collect();
        if session_votes.polarity(option.id) != Some(input.polarity) {
            self.ensure_rows(option.id, input.polarity, &session_votes)
                .await?;
        }

        let change = self
            .voting
            .record_vote(session.id, option.id, input.polarity)
            .await?;

        if !change.is_genuine() {
            debug!(
                "Session {} re-saved {} on option {}, nothing to update",
                session.id,
                polarity_label(input.polarity),
                option.id
            );
            return Ok(RecordVoteOutput {
                change,
                rows_updated: 0,
            });
        }

        info!(
            "Session {} voted {} on option '{}' ({})",
            session.id,
            polarity_label(input.polarity),
            option.label,
            change.as_str()
        );
        self.events.log(VoteEvent::new(
            "vote_recorded",
            json!({
                "session": session.id,
                "option": option.id,
                "polarity": input.polarity,
                "change": change.as_str(),
            }),
        ));

        let updates = plan_vote_updates(&change, &session_votes);

        let mut updated = Vec::with_capacity(updates.len());
        for update in &updates {
            let row = self
                .correlations
                .update_correlation_ema(&update.key, update.observed)
                .await?;
            debug!(
                "Correlation {} observed {:.1} -> {:.4} (n={})",
                update.key, update.observed, row.value, row.count
            );
            updated.push(json!({
                "key": update.key,
                "observed": update.observed,
                "value": row.value,
                "count": row.count,
            }));
        }

        if !updated.is_empty() {
            self.events.log(VoteEvent::new(
                "correlations_updated",
                json!({
                    "session": session.id,
                    "option": option.id,
                    "rows": updated,
                }),
            ));
        }

        Ok(RecordVoteOutput {
            change,
            rows_updated: updates.len(),
        })
    }
}

impl<V: VotingRepository + 'static, C: CorrelationRepository + 'static> RecordVoteUseCase<V, C> {
    /// Fails with `NotFound` if any row between `option` and an earlier vote is missing
    async fn ensure_rows(
        &self,
        option: OptionId,
        polarity: bool,
        session_votes: &SessionVotes,
    ) -> Result<(), DomainError> {
        for (counterpart, counterpart_polarity) in session_votes.iter() {
            if counterpart == option {
                continue;
            }
            for key in [
                CorrelationKey::new(counterpart, counterpart_polarity, option),
                CorrelationKey::new(option, polarity, counterpart),
            ] {
                self.correlations
                    .get_correlation(&key)
                    .await
                    .inspect_err(|e| warn!("Vote on option {} rejected: {}", option, e))?;
            }
        }
        Ok(())
    }
}

fn polarity_label(polarity: bool) -> &'static str {
    if polarity { "yes" } else { "no" }
}
