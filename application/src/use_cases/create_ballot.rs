//! Create Ballot use case

use crate::ports::voting_repository::VotingRepository;
use concord_domain::{Ballot, DomainError, validate_label};
use std::sync::Arc;
use tracing::info;

/// Use case for creating an empty ballot
pub struct CreateBallotUseCase<V: VotingRepository + 'static> {
    voting: Arc<V>,
}

impl<V: VotingRepository + 'static> CreateBallotUseCase<V> {
    pub fn new(voting: Arc<V>) -> Self {
        Self { voting }
    }

    pub async fn execute(&self, label: &str) -> Result<Ballot, DomainError> {
        let label = validate_label(label)?;
        let ballot = self.voting.create_ballot(&label).await?;
        info!("Created ballot {} '{}'", ballot.id, ballot.label);
        Ok(ballot)
    }
}
