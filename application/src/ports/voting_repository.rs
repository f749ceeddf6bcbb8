//! Voting record store port
//!
//! Defines the interface to the store that owns ballots, options, rooms,
//! sessions and votes. The engine references all of them by id only.

use async_trait::async_trait;
use concord_domain::{
    Ballot, BallotId, BallotOption, DomainError, OptionId, Room, RoomId, SessionId, UserVote,
    VoteChange, VoteId, VotingSession,
};

/// Store for voting records
///
/// Implementations (adapters) live in the infrastructure layer. Listing
/// methods return records in creation order.
#[async_trait]
pub trait VotingRepository: Send + Sync {
    // ==================== Ballots ====================

    /// Create a ballot; labels are unique
    async fn create_ballot(&self, label: &str) -> Result<Ballot, DomainError>;

    async fn get_ballot(&self, id: BallotId) -> Result<Ballot, DomainError>;

    async fn find_ballot(&self, label: &str) -> Result<Option<Ballot>, DomainError>;

    async fn list_ballots(&self) -> Result<Vec<Ballot>, DomainError>;

    // ==================== Options ====================

    /// Create an option; labels are unique within the ballot
    async fn create_option(
        &self,
        ballot: BallotId,
        label: &str,
    ) -> Result<BallotOption, DomainError>;

    async fn get_option(&self, id: OptionId) -> Result<BallotOption, DomainError>;

    /// Options in the ballot, in creation order
    async fn options_in_ballot(&self, ballot: BallotId) -> Result<Vec<BallotOption>, DomainError>;

    /// Delete an option together with every vote cast on it
    async fn delete_option(&self, id: OptionId) -> Result<BallotOption, DomainError>;

    // ==================== Rooms & sessions ====================

    async fn create_room(&self, ballot: BallotId) -> Result<Room, DomainError>;

    async fn get_room(&self, id: RoomId) -> Result<Room, DomainError>;

    /// Create a session in the room ("join")
    async fn create_session(&self, room: RoomId) -> Result<VotingSession, DomainError>;

    async fn get_session(&self, id: SessionId) -> Result<VotingSession, DomainError>;

    async fn sessions_in_room(&self, room: RoomId) -> Result<Vec<VotingSession>, DomainError>;

    // ==================== Votes ====================

    /// Insert or update the session's vote on the option.
    ///
    /// At most one vote exists per (session, option). Re-saving the same
    /// polarity writes nothing and reports [`VoteChange::Unchanged`].
    async fn record_vote(
        &self,
        session: SessionId,
        option: OptionId,
        polarity: bool,
    ) -> Result<VoteChange, DomainError>;

    async fn get_vote(&self, id: VoteId) -> Result<UserVote, DomainError>;

    async fn delete_vote(&self, id: VoteId) -> Result<UserVote, DomainError>;

    async fn votes_by_session(&self, session: SessionId) -> Result<Vec<UserVote>, DomainError>;

    /// Votes of every session in the room
    async fn votes_in_room(&self, room: RoomId) -> Result<Vec<UserVote>, DomainError>;
}
