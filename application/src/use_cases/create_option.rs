//! Create Option use case
//!
//! Adds an option to a ballot and seeds its correlation rows against every
//! option created before it. The ballot is locked exclusively for the whole
//! operation, so no vote or suggestion request can observe the option before
//! its rows exist. If the rows cannot be created the option is removed again.

use crate::locks::LockRegistry;
use crate::ports::correlation_repository::CorrelationRepository;
use crate::ports::vote_event_logger::{VoteEvent, VoteEventLogger};
use crate::ports::voting_repository::VotingRepository;
use concord_domain::{BallotId, BallotOption, DomainError, OptionId, validate_label};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Input for the CreateOption use case
#[derive(Debug, Clone)]
pub struct CreateOptionInput {
    pub ballot: BallotId,
    pub label: String,
}

impl CreateOptionInput {
    pub fn new(ballot: BallotId, label: impl Into<String>) -> Self {
        Self {
            ballot,
            label: label.into(),
        }
    }
}

/// Use case for adding an option to a ballot
pub struct CreateOptionUseCase<V: VotingRepository + 'static, C: CorrelationRepository + 'static> {
    voting: Arc<V>,
    correlations: Arc<C>,
    locks: Arc<LockRegistry>,
    events: Arc<dyn VoteEventLogger>,
}

impl<V: VotingRepository + 'static, C: CorrelationRepository + 'static> CreateOptionUseCase<V, C> {
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

    pub async fn execute(&self, input: CreateOptionInput) -> Result<BallotOption, DomainError> {
        let label = validate_label(&input.label)?;
        let ballot = self.voting.get_ballot(input.ballot).await?;

        let _barrier = self.locks.write_ballot(ballot.id).await;

        let existing: Vec<OptionId> = self
            .voting
            .options_in_ballot(ballot.id)
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();

        let option = self.voting.create_option(ballot.id, &label).await?;
        info!(
            "Created option {} '{}' in ballot '{}'",
            option.id, option.label, ballot.label
        );
        self.events.log(VoteEvent::new(
            "option_created",
            json!({
                "ballot": ballot.id,
                "option": option.id,
                "label": option.label,
            }),
        ));

        let created = match self
            .correlations
            .initialize_option_correlations(option.id, &existing)
            .await
        {
            Ok(created) => created,
            Err(e) => {
                error!(
                    "Correlation initialization failed for option {}: {}",
                    option.id, e
                );
                // Still under the barrier: nobody has seen the option yet
                self.voting.delete_option(option.id).await?;
                self.events.log(VoteEvent::new(
                    "option_deleted",
                    json!({ "ballot": ballot.id, "option": option.id }),
                ));
                return Err(e);
            }
        };

        debug!(
            "Initialized {} correlation rows for option {} against {} existing options",
            created,
            option.id,
            existing.len()
        );
        if created > 0 {
            self.events.log(VoteEvent::new(
                "correlations_initialized",
                json!({
                    "option": option.id,
                    "existing": existing,
                    "rows": created,
                }),
            ));
        }

        Ok(option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::vote_event_logger::NoEventLogger;
    use crate::use_cases::test_support::{MemoryCorrelations, MemoryVoting};
    use concord_domain::{Correlation, CorrelationKey};

    fn use_case(
        voting: &Arc<MemoryVoting>,
        correlations: &Arc<MemoryCorrelations>,
    ) -> CreateOptionUseCase<MemoryVoting, MemoryCorrelations> {
        CreateOptionUseCase::new(
            voting.clone(),
            correlations.clone(),
            Arc::new(LockRegistry::new()),
            Arc::new(NoEventLogger),
        )
    }

    #[tokio::test]
    async fn test_first_option_creates_no_rows() {
        let voting = Arc::new(MemoryVoting::default());
        let correlations = Arc::new(MemoryCorrelations::default());
        let ballot = voting.create_ballot("Colors").await.unwrap();

        use_case(&voting, &correlations)
            .execute(CreateOptionInput::new(ballot.id, "Red"))
            .await
            .unwrap();

        assert_eq!(correlations.row_count().await, 0);
    }

    #[tokio::test]
    async fn test_each_pair_gets_four_neutral_rows() {
        let voting = Arc::new(MemoryVoting::default());
        let correlations = Arc::new(MemoryCorrelations::default());
        let ballot = voting.create_ballot("Colors").await.unwrap();
        let create = use_case(&voting, &correlations);

        let red = create
            .execute(CreateOptionInput::new(ballot.id, "Red"))
            .await
            .unwrap();
        let blue = create
            .execute(CreateOptionInput::new(ballot.id, "Blue"))
            .await
            .unwrap();
        create
            .execute(CreateOptionInput::new(ballot.id, "Green"))
            .await
            .unwrap();

        // 3 pairs x 4 rows
        assert_eq!(correlations.row_count().await, 12);
        for key in [
            CorrelationKey::new(red.id, true, blue.id),
            CorrelationKey::new(red.id, false, blue.id),
            CorrelationKey::new(blue.id, true, red.id),
            CorrelationKey::new(blue.id, false, red.id),
        ] {
            assert_eq!(
                correlations.get_correlation(&key).await.unwrap(),
                Correlation::default()
            );
        }
    }

    #[tokio::test]
    async fn test_options_in_other_ballots_are_not_paired() {
        let voting = Arc::new(MemoryVoting::default());
        let correlations = Arc::new(MemoryCorrelations::default());
        let colors = voting.create_ballot("Colors").await.unwrap();
        let shapes = voting.create_ballot("Shapes").await.unwrap();
        let create = use_case(&voting, &correlations);

        create
            .execute(CreateOptionInput::new(colors.id, "Red"))
            .await
            .unwrap();
        create
            .execute(CreateOptionInput::new(shapes.id, "Circle"))
            .await
            .unwrap();

        assert_eq!(correlations.row_count().await, 0);
    }

    #[tokio::test]
    async fn test_blank_label_rejected() {
        let voting = Arc::new(MemoryVoting::default());
        let correlations = Arc::new(MemoryCorrelations::default());
        let ballot = voting.create_ballot("Colors").await.unwrap();

        let err = use_case(&voting, &correlations)
            .execute(CreateOptionInput::new(ballot.id, "   "))
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_duplicate_rows_surface_constraint_violation() {
        let voting = Arc::new(MemoryVoting::default());
        let correlations = Arc::new(MemoryCorrelations::default());
        let ballot = voting.create_ballot("Colors").await.unwrap();
        let create = use_case(&voting, &correlations);

        let red = create
            .execute(CreateOptionInput::new(ballot.id, "Red"))
            .await
            .unwrap();
        let blue = create
            .execute(CreateOptionInput::new(ballot.id, "Blue"))
            .await
            .unwrap();

        let err = correlations
            .initialize_option_correlations(blue.id, &[red.id])
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(correlations.row_count().await, 4);
    }

    #[tokio::test]
    async fn test_failed_row_init_removes_option() {
        let voting = Arc::new(MemoryVoting::default());
        let correlations = Arc::new(MemoryCorrelations::default());
        let ballot = voting.create_ballot("Colors").await.unwrap();
        let create = use_case(&voting, &correlations);

        let red = create
            .execute(CreateOptionInput::new(ballot.id, "Red"))
            .await
            .unwrap();

        // Ids come from one counter: the next option gets red + 1
        let next = OptionId::new(red.id.get() + 1);
        correlations
            .initialize_option_correlations(next, &[red.id])
            .await
            .unwrap();

        let err = create
            .execute(CreateOptionInput::new(ballot.id, "Blue"))
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation());

        let labels: Vec<String> = voting
            .options_in_ballot(ballot.id)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Red"]);
        assert_eq!(correlations.row_count().await, 4);
    }
}
