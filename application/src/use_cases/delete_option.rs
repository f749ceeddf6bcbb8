//! Delete Option use case
//!
//! Removing an option cascades to its votes and to every correlation row in
//! which it is predicate or target.

use crate::locks::LockRegistry;
use crate::ports::correlation_repository::CorrelationRepository;
use crate::ports::vote_event_logger::{VoteEvent, VoteEventLogger};
use crate::ports::voting_repository::VotingRepository;
use concord_domain::{BallotOption, DomainError, OptionId};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Use case for deleting an option
pub struct DeleteOptionUseCase<V: VotingRepository + 'static, C: CorrelationRepository + 'static> {
    voting: Arc<V>,
    correlations: Arc<C>,
    locks: Arc<LockRegistry>,
    events: Arc<dyn VoteEventLogger>,
}

impl<V: VotingRepository + 'static, C: CorrelationRepository + 'static> DeleteOptionUseCase<V, C> {
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

    pub async fn execute(&self, option: OptionId) -> Result<BallotOption, DomainError> {
        let ballot = self.voting.get_option(option).await?.ballot;
        let _barrier = self.locks.write_ballot(ballot).await;

        let removed = self.voting.delete_option(option).await?;
        let rows = self.correlations.remove_option(option).await?;

        info!(
            "Deleted option {} '{}' and {} correlation rows",
            removed.id, removed.label, rows
        );
        self.events.log(VoteEvent::new(
            "option_deleted",
            json!({ "option": removed.id, "rows": rows }),
        ));

        Ok(removed)
    }
}
