//! Voting engine facade
//!
//! Bundles every use case over one pair of stores and one lock registry, so
//! callers (the REPL, start-up seeding) do not wire them one by one.

use crate::locks::LockRegistry;
use crate::ports::correlation_repository::CorrelationRepository;
use crate::ports::vote_event_logger::{NoEventLogger, VoteEventLogger};
use crate::ports::voting_repository::VotingRepository;
use crate::use_cases::create_ballot::CreateBallotUseCase;
use crate::use_cases::create_option::{CreateOptionInput, CreateOptionUseCase};
use crate::use_cases::delete_option::DeleteOptionUseCase;
use crate::use_cases::get_consensus::GetConsensusUseCase;
use crate::use_cases::get_suggestions::{GetSuggestionsInput, GetSuggestionsUseCase};
use crate::use_cases::record_vote::{RecordVoteInput, RecordVoteOutput, RecordVoteUseCase};
use crate::use_cases::rooms::{JoinRoomUseCase, OpenRoomUseCase};
use crate::use_cases::votes::{DeleteVoteUseCase, ListVotesUseCase};
use concord_domain::{
    Ballot, BallotId, BallotOption, ConsensusEntry, DomainError, OptionId, Room, RoomId,
    SessionId, Suggestion, UserVote, VoteId, VotingSession,
};
use std::sync::Arc;
use tracing::info;

/// All voting operations over shared stores
pub struct VotingEngine<V: VotingRepository + 'static, C: CorrelationRepository + 'static> {
    voting: Arc<V>,
    correlations: Arc<C>,
    create_ballot: CreateBallotUseCase<V>,
    create_option: CreateOptionUseCase<V, C>,
    delete_option: DeleteOptionUseCase<V, C>,
    open_room: OpenRoomUseCase<V>,
    join_room: JoinRoomUseCase<V>,
    record_vote: RecordVoteUseCase<V, C>,
    list_votes: ListVotesUseCase<V>,
    delete_vote: DeleteVoteUseCase<V>,
    suggestions: GetSuggestionsUseCase<V, C>,
    consensus: GetConsensusUseCase<V>,
}

impl<V: VotingRepository + 'static, C: CorrelationRepository + 'static> VotingEngine<V, C> {
    pub fn new(voting: Arc<V>, correlations: Arc<C>) -> Self {
        Self::with_event_logger(voting, correlations, Arc::new(NoEventLogger))
    }

    pub fn with_event_logger(
        voting: Arc<V>,
        correlations: Arc<C>,
        events: Arc<dyn VoteEventLogger>,
    ) -> Self {
        let locks = Arc::new(LockRegistry::new());
        Self {
            create_ballot: CreateBallotUseCase::new(voting.clone()),
            create_option: CreateOptionUseCase::new(
                voting.clone(),
                correlations.clone(),
                locks.clone(),
                events.clone(),
            ),
            delete_option: DeleteOptionUseCase::new(
                voting.clone(),
                correlations.clone(),
                locks.clone(),
                events.clone(),
            ),
            open_room: OpenRoomUseCase::new(voting.clone()),
            join_room: JoinRoomUseCase::new(voting.clone()),
            record_vote: RecordVoteUseCase::new(
                voting.clone(),
                correlations.clone(),
                locks.clone(),
                events.clone(),
            ),
            list_votes: ListVotesUseCase::new(voting.clone()),
            delete_vote: DeleteVoteUseCase::new(voting.clone(), locks.clone(), events),
            suggestions: GetSuggestionsUseCase::new(
                voting.clone(),
                correlations.clone(),
                locks.clone(),
            ),
            consensus: GetConsensusUseCase::new(voting.clone(), locks),
            voting,
            correlations,
        }
    }

    pub fn voting(&self) -> &Arc<V> {
        &self.voting
    }

    pub fn correlations(&self) -> &Arc<C> {
        &self.correlations
    }

    // ==================== Ballots & options ====================

    pub async fn create_ballot(&self, label: &str) -> Result<Ballot, DomainError> {
        self.create_ballot.execute(label).await
    }

    pub async fn create_option(
        &self,
        ballot: BallotId,
        label: &str,
    ) -> Result<BallotOption, DomainError> {
        self.create_option
            .execute(CreateOptionInput::new(ballot, label))
            .await
    }

    pub async fn delete_option(&self, option: OptionId) -> Result<BallotOption, DomainError> {
        self.delete_option.execute(option).await
    }

    pub async fn options(&self, ballot: BallotId) -> Result<Vec<BallotOption>, DomainError> {
        self.voting.options_in_ballot(ballot).await
    }

    pub async fn find_ballot(&self, label: &str) -> Result<Option<Ballot>, DomainError> {
        self.voting.find_ballot(label.trim()).await
    }

    /// Every ballot with its options, in creation order
    pub async fn ballots(&self) -> Result<Vec<(Ballot, Vec<BallotOption>)>, DomainError> {
        let mut listing = Vec::new();
        for ballot in self.voting.list_ballots().await? {
            let options = self.voting.options_in_ballot(ballot.id).await?;
            listing.push((ballot, options));
        }
        Ok(listing)
    }

    /// Create the ballot if its label is new, then add whichever options it
    /// does not have yet. Returns the ballot and the options created.
    pub async fn ensure_ballot(
        &self,
        label: &str,
        options: &[String],
    ) -> Result<(Ballot, Vec<BallotOption>), DomainError> {
        let ballot = match self.find_ballot(label).await? {
            Some(existing) => existing,
            None => self.create_ballot(label).await?,
        };

        let present: Vec<String> = self
            .voting
            .options_in_ballot(ballot.id)
            .await?
            .into_iter()
            .map(|o| o.label)
            .collect();

        let mut created = Vec::new();
        for option in options {
            if present.iter().any(|p| p == option.trim()) {
                continue;
            }
            created.push(self.create_option(ballot.id, option).await?);
        }

        if !created.is_empty() {
            info!(
                "Seeded ballot '{}' with {} new options",
                ballot.label,
                created.len()
            );
        }
        Ok((ballot, created))
    }

    // ==================== Rooms ====================

    pub async fn open_room(&self, ballot: BallotId) -> Result<Room, DomainError> {
        self.open_room.execute(ballot).await
    }

    pub async fn join_room(&self, room: RoomId) -> Result<VotingSession, DomainError> {
        self.join_room.execute(room).await
    }

    // ==================== Votes ====================

    pub async fn vote(
        &self,
        token: SessionId,
        option: OptionId,
        polarity: bool,
    ) -> Result<RecordVoteOutput, DomainError> {
        self.record_vote
            .execute(RecordVoteInput::new(token, option, polarity))
            .await
    }

    pub async fn votes(&self, token: SessionId) -> Result<Vec<UserVote>, DomainError> {
        self.list_votes.execute(Some(token)).await
    }

    pub async fn vote_by_id(&self, token: SessionId, id: VoteId) -> Result<UserVote, DomainError> {
        self.list_votes.get(Some(token), id).await
    }

    pub async fn delete_vote(&self, token: SessionId, id: VoteId) -> Result<UserVote, DomainError> {
        self.delete_vote.execute(Some(token), id).await
    }

    // ==================== Queries ====================

    pub async fn suggestions(
        &self,
        input: GetSuggestionsInput,
    ) -> Result<Vec<Suggestion>, DomainError> {
        self.suggestions.execute(input).await
    }

    pub async fn consensus(&self, token: SessionId) -> Result<Vec<ConsensusEntry>, DomainError> {
        self.consensus.execute(Some(token)).await
    }
}
