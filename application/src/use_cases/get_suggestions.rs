//! Get Suggestions use case
//!
//! Ranks the options a session has not voted on yet, either by how likely
//! the session approves them (`suggest`) or by how much its answer would
//! reveal (`explore`).

use crate::locks::LockRegistry;
use crate::ports::correlation_repository::CorrelationRepository;
use crate::ports::voting_repository::VotingRepository;
use crate::use_cases::shared::resolve_session;
use concord_domain::{
    DomainError, OptionId, ScoringInput, SessionId, SessionVotes, Suggestion, SuggestionMode,
    parse_session_token, score_candidates,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Input for the GetSuggestions use case
#[derive(Debug, Clone, Copy)]
pub struct GetSuggestionsInput {
    pub token: Option<SessionId>,
    pub mode: SuggestionMode,
    /// Maximum number of suggestions; `None` returns every candidate
    pub limit: Option<usize>,
}

impl GetSuggestionsInput {
    pub fn new(token: SessionId, mode: SuggestionMode) -> Self {
        Self {
            token: Some(token),
            mode,
            limit: None,
        }
    }

    /// Build from raw request parameters.
    ///
    /// Missing or malformed token and mode are both invalid arguments.
    pub fn from_params(token: Option<&str>, mode: Option<&str>) -> Result<Self, DomainError> {
        let token = parse_session_token(token)?;
        let mode = SuggestionMode::from_param(mode)?;
        Ok(Self::new(token, mode))
    }

    /// Cap the result length; `0` means no cap
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }
}

/// Use case for ranking a session's next options
pub struct GetSuggestionsUseCase<V: VotingRepository + 'static, C: CorrelationRepository + 'static>
{
    voting: Arc<V>,
    correlations: Arc<C>,
    locks: Arc<LockRegistry>,
}

impl<V: VotingRepository + 'static, C: CorrelationRepository + 'static>
    GetSuggestionsUseCase<V, C>
{
    pub fn new(voting: Arc<V>, correlations: Arc<C>, locks: Arc<LockRegistry>) -> Self {
        Self {
            voting,
            correlations,
            locks,
        }
    }

    pub async fn execute(&self, input: GetSuggestionsInput) -> Result<Vec<Suggestion>, DomainError> {
        let (session, room) = resolve_session(self.voting.as_ref(), input.token).await?;
        let _ballot = self.locks.read_ballot(room.ballot).await;

        let options: Vec<OptionId> = self
            .voting
            .options_in_ballot(room.ballot)
            .await?
            .into_iter()
            .map(|o| o.id)
            .collect();

        let session_votes: SessionVotes = self
            .voting
            .votes_by_session(session.id)
            .await?
            .iter()
            .collect();

        let rejected_in_room: HashSet<OptionId> = match input.mode {
            SuggestionMode::Suggest => self
                .voting
                .votes_in_room(room.id)
                .await?
                .into_iter()
                .filter(|v| v.session != session.id && !v.polarity)
                .map(|v| v.option)
                .collect(),
            SuggestionMode::Explore => HashSet::new(),
        };

        let correlations = self.correlations.snapshot(&options).await?;

        let mut suggestions = score_candidates(
            input.mode,
            ScoringInput {
                options: &options,
                session_votes: &session_votes,
                correlations: &correlations,
                rejected_in_room: &rejected_in_room,
            },
        );
        if let Some(limit) = input.limit {
            suggestions.truncate(limit);
        }

        debug!(
            "Session {} {} mode: {} suggestions from {} options ({} voted, {} rejected in room)",
            session.id,
            input.mode.as_str(),
            suggestions.len(),
            options.len(),
            session_votes.len(),
            rejected_in_room.len()
        );

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::vote_event_logger::NoEventLogger;
    use crate::use_cases::create_option::{CreateOptionInput, CreateOptionUseCase};
    use crate::use_cases::record_vote::{RecordVoteInput, RecordVoteUseCase};
    use crate::use_cases::test_support::{MemoryCorrelations, MemoryVoting};
    use concord_domain::{BallotId, RoomId};

    struct Fixture {
        voting: Arc<MemoryVoting>,
        vote: RecordVoteUseCase<MemoryVoting, MemoryCorrelations>,
        suggestions: GetSuggestionsUseCase<MemoryVoting, MemoryCorrelations>,
        ballot: BallotId,
        room: RoomId,
        options: Vec<OptionId>,
    }

    async fn fixture(labels: &[&str]) -> Fixture {
        let voting = Arc::new(MemoryVoting::default());
        let correlations = Arc::new(MemoryCorrelations::default());
        let locks = Arc::new(LockRegistry::new());

        let ballot = voting.create_ballot("Trip").await.unwrap();
        let create = CreateOptionUseCase::new(
            voting.clone(),
            correlations.clone(),
            locks.clone(),
            Arc::new(NoEventLogger),
        );
        let mut options = Vec::new();
        for label in labels {
            let option = create
                .execute(CreateOptionInput::new(ballot.id, *label))
                .await
                .unwrap();
            options.push(option.id);
        }
        let room = voting.create_room(ballot.id).await.unwrap();

        Fixture {
            vote: RecordVoteUseCase::new(
                voting.clone(),
                correlations.clone(),
                locks.clone(),
                Arc::new(NoEventLogger),
            ),
            suggestions: GetSuggestionsUseCase::new(voting.clone(), correlations, locks),
            voting,
            ballot: ballot.id,
            room: room.id,
            options,
        }
    }

    impl Fixture {
        async fn join(&self) -> SessionId {
            self.voting.create_session(self.room).await.unwrap().id
        }

        async fn cast(&self, session: SessionId, option: OptionId, polarity: bool) {
            self.vote
                .execute(RecordVoteInput::new(session, option, polarity))
                .await
                .unwrap();
        }

        async fn ids(&self, session: SessionId, mode: SuggestionMode) -> Vec<OptionId> {
            self.suggestions
                .execute(GetSuggestionsInput::new(session, mode))
                .await
                .unwrap()
                .into_iter()
                .map(|s| s.id)
                .collect()
        }
    }

    #[tokio::test]
    async fn test_single_option_returns_neutral() {
        let f = fixture(&["Lisbon"]).await;
        let session = f.join().await;

        let result = f
            .suggestions
            .execute(GetSuggestionsInput::new(session, SuggestionMode::Suggest))
            .await
            .unwrap();

        assert_eq!(
            result,
            vec![Suggestion {
                id: f.options[0],
                score: 0.5
            }]
        );
    }

    #[tokio::test]
    async fn test_suggest_excludes_own_votes_and_room_rejections() {
        let f = fixture(&["Lisbon", "Porto", "Faro"]).await;
        let me = f.join().await;
        let other = f.join().await;

        f.cast(me, f.options[0], true).await;
        f.cast(other, f.options[1], false).await;

        assert_eq!(f.ids(me, SuggestionMode::Suggest).await, vec![f.options[2]]);
        assert_eq!(
            f.ids(me, SuggestionMode::Explore).await.len(),
            2,
            "explore keeps options rejected by others"
        );
    }

    #[tokio::test]
    async fn test_own_rejection_only_drops_that_option() {
        let f = fixture(&["Lisbon", "Porto"]).await;
        let me = f.join().await;

        f.cast(me, f.options[0], false).await;

        assert_eq!(f.ids(me, SuggestionMode::Suggest).await, vec![f.options[1]]);
    }

    #[tokio::test]
    async fn test_votes_in_other_rooms_are_ignored() {
        let f = fixture(&["Lisbon", "Porto"]).await;
        let me = f.join().await;
        let elsewhere = f.voting.create_room(f.ballot).await.unwrap();
        let stranger = f.voting.create_session(elsewhere.id).await.unwrap().id;

        f.cast(stranger, f.options[0], false).await;

        assert_eq!(f.ids(me, SuggestionMode::Suggest).await, f.options);
    }

    #[tokio::test]
    async fn test_learned_correlation_ranks_suggestions() {
        let f = fixture(&["Lisbon", "Porto", "Faro"]).await;
        let (lisbon, porto, faro) = (f.options[0], f.options[1], f.options[2]);

        // Earlier sessions who liked Lisbon also liked Faro
        for _ in 0..3 {
            let s = f.join().await;
            f.cast(s, lisbon, true).await;
            f.cast(s, faro, true).await;
        }

        let me = f.join().await;
        f.cast(me, lisbon, true).await;

        let ranked = f.ids(me, SuggestionMode::Suggest).await;
        assert_eq!(ranked, vec![faro, porto]);
    }

    #[tokio::test]
    async fn test_limit_truncates() {
        let f = fixture(&["Lisbon", "Porto", "Faro"]).await;
        let me = f.join().await;

        let result = f
            .suggestions
            .execute(GetSuggestionsInput::new(me, SuggestionMode::Explore).with_limit(1))
            .await
            .unwrap();
        assert_eq!(result.len(), 1);

        let unlimited = f
            .suggestions
            .execute(GetSuggestionsInput::new(me, SuggestionMode::Explore).with_limit(0))
            .await
            .unwrap();
        assert_eq!(unlimited.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_params() {
        assert!(
            GetSuggestionsInput::from_params(None, Some("suggest"))
                .unwrap_err()
                .is_invalid_argument()
        );
        assert!(
            GetSuggestionsInput::from_params(Some("1"), None)
                .unwrap_err()
                .is_invalid_argument()
        );
        assert!(
            GetSuggestionsInput::from_params(Some("1"), Some("bogus"))
                .unwrap_err()
                .is_invalid_argument()
        );
        let input = GetSuggestionsInput::from_params(Some("4"), Some("explore")).unwrap();
        assert_eq!(input.token, Some(SessionId::new(4)));
        assert_eq!(input.mode, SuggestionMode::Explore);
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid_argument() {
        let f = fixture(&["Lisbon"]).await;
        let err = f
            .suggestions
            .execute(GetSuggestionsInput::new(
                SessionId::new(999),
                SuggestionMode::Suggest,
            ))
            .await
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
