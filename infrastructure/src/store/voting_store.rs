//! In-memory voting record store
//!
//! Records live in `DashMap`s keyed by id. Ids come from one monotonic
//! counter, so sorting by id gives creation order. Uniqueness rules (ballot
//! labels, option labels per ballot, one vote per session and option) are
//! enforced through index maps whose entry guard is held while the record
//! is written.

use async_trait::async_trait;
use concord_application::VotingRepository;
use concord_domain::{
    Ballot, BallotId, BallotOption, DomainError, OptionId, Room, RoomId, SessionId, UserVote,
    VoteChange, VoteId, VotingSession,
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// In-memory [`VotingRepository`]
pub struct InMemoryVotingStore {
    next_id: AtomicU64,
    ballots: DashMap<BallotId, Ballot>,
    ballot_labels: DashMap<String, BallotId>,
    options: DashMap<OptionId, BallotOption>,
    option_labels: DashMap<(BallotId, String), OptionId>,
    rooms: DashMap<RoomId, Room>,
    sessions: DashMap<SessionId, VotingSession>,
    votes: DashMap<VoteId, UserVote>,
    vote_index: DashMap<(SessionId, OptionId), VoteId>,
}

impl InMemoryVotingStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            ballots: DashMap::new(),
            ballot_labels: DashMap::new(),
            options: DashMap::new(),
            option_labels: DashMap::new(),
            rooms: DashMap::new(),
            sessions: DashMap::new(),
            votes: DashMap::new(),
            vote_index: DashMap::new(),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn sorted_votes(&self, keep: impl Fn(&UserVote) -> bool) -> Vec<UserVote> {
        let mut votes: Vec<UserVote> = self
            .votes
            .iter()
            .filter(|v| keep(v.value()))
            .map(|v| *v.value())
            .collect();
        votes.sort_by_key(|v| v.id);
        votes
    }
}

impl Default for InMemoryVotingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VotingRepository for InMemoryVotingStore {
    async fn create_ballot(&self, label: &str) -> Result<Ballot, DomainError> {
        match self.ballot_labels.entry(label.to_string()) {
            Entry::Occupied(_) => Err(DomainError::constraint(format!(
                "ballot with label '{}' already exists",
                label
            ))),
            Entry::Vacant(slot) => {
                let ballot = Ballot {
                    id: BallotId::new(self.next_id()),
                    label: label.to_string(),
                };
                self.ballots.insert(ballot.id, ballot.clone());
                slot.insert(ballot.id);
                Ok(ballot)
            }
        }
    }

    async fn get_ballot(&self, id: BallotId) -> Result<Ballot, DomainError> {
        self.ballots
            .get(&id)
            .map(|b| b.clone())
            .ok_or_else(|| DomainError::not_found("ballot", id))
    }

    async fn find_ballot(&self, label: &str) -> Result<Option<Ballot>, DomainError> {
        Ok(self
            .ballot_labels
            .get(label)
            .and_then(|id| self.ballots.get(id.value()).map(|b| b.clone())))
    }

    async fn list_ballots(&self) -> Result<Vec<Ballot>, DomainError> {
        let mut ballots: Vec<Ballot> = self.ballots.iter().map(|b| b.value().clone()).collect();
        ballots.sort_by_key(|b| b.id);
        Ok(ballots)
    }

    async fn create_option(
        &self,
        ballot: BallotId,
        label: &str,
    ) -> Result<BallotOption, DomainError> {
        if !self.ballots.contains_key(&ballot) {
            return Err(DomainError::not_found("ballot", ballot));
        }

        match self.option_labels.entry((ballot, label.to_string())) {
            Entry::Occupied(_) => Err(DomainError::constraint(format!(
                "option '{}' already exists in ballot {}",
                label, ballot
            ))),
            Entry::Vacant(slot) => {
                let option = BallotOption {
                    id: OptionId::new(self.next_id()),
                    ballot,
                    label: label.to_string(),
                };
                self.options.insert(option.id, option.clone());
                slot.insert(option.id);
                Ok(option)
            }
        }
    }

    async fn get_option(&self, id: OptionId) -> Result<BallotOption, DomainError> {
        self.options
            .get(&id)
            .map(|o| o.clone())
            .ok_or_else(|| DomainError::not_found("option", id))
    }

    async fn options_in_ballot(&self, ballot: BallotId) -> Result<Vec<BallotOption>, DomainError> {
        let mut options: Vec<BallotOption> = self
            .options
            .iter()
            .filter(|o| o.ballot == ballot)
            .map(|o| o.value().clone())
            .collect();
        options.sort_by_key(|o| o.id);
        Ok(options)
    }

    async fn delete_option(&self, id: OptionId) -> Result<BallotOption, DomainError> {
        let (_, option) = self
            .options
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("option", id))?;
        self.option_labels
            .remove(&(option.ballot, option.label.clone()));

        let votes: Vec<UserVote> = self.sorted_votes(|v| v.option == id);
        for vote in &votes {
            self.vote_index.remove(&(vote.session, vote.option));
            self.votes.remove(&vote.id);
        }
        debug!("Option {} removed with {} votes", id, votes.len());

        Ok(option)
    }

    async fn create_room(&self, ballot: BallotId) -> Result<Room, DomainError> {
        if !self.ballots.contains_key(&ballot) {
            return Err(DomainError::not_found("ballot", ballot));
        }
        let room = Room {
            id: RoomId::new(self.next_id()),
            ballot,
        };
        self.rooms.insert(room.id, room);
        Ok(room)
    }

    async fn get_room(&self, id: RoomId) -> Result<Room, DomainError> {
        self.rooms
            .get(&id)
            .map(|r| *r)
            .ok_or_else(|| DomainError::not_found("room", id))
    }

    async fn create_session(&self, room: RoomId) -> Result<VotingSession, DomainError> {
        if !self.rooms.contains_key(&room) {
            return Err(DomainError::not_found("room", room));
        }
        let session = VotingSession {
            id: SessionId::new(self.next_id()),
            room,
        };
        self.sessions.insert(session.id, session);
        Ok(session)
    }

    async fn get_session(&self, id: SessionId) -> Result<VotingSession, DomainError> {
        self.sessions
            .get(&id)
            .map(|s| *s)
            .ok_or_else(|| DomainError::not_found("session", id))
    }

    async fn sessions_in_room(&self, room: RoomId) -> Result<Vec<VotingSession>, DomainError> {
        let mut sessions: Vec<VotingSession> = self
            .sessions
            .iter()
            .filter(|s| s.room == room)
            .map(|s| *s.value())
            .collect();
        sessions.sort_by_key(|s| s.id);
        Ok(sessions)
    }

    async fn record_vote(
        &self,
        session: SessionId,
        option: OptionId,
        polarity: bool,
    ) -> Result<VoteChange, DomainError> {
        if !self.sessions.contains_key(&session) {
            return Err(DomainError::not_found("session", session));
        }
        if !self.options.contains_key(&option) {
            return Err(DomainError::not_found("option", option));
        }

        // The index entry guard serializes writers on the same (session, option)
        match self.vote_index.entry((session, option)) {
            Entry::Occupied(slot) => {
                let id = *slot.get();
                let mut stored = self
                    .votes
                    .get_mut(&id)
                    .ok_or_else(|| DomainError::not_found("vote", id))?;
                if stored.polarity == polarity {
                    return Ok(VoteChange::Unchanged(*stored));
                }
                stored.polarity = polarity;
                Ok(VoteChange::PolarityChanged {
                    vote: *stored,
                    previous: !polarity,
                })
            }
            Entry::Vacant(slot) => {
                let vote = UserVote {
                    id: VoteId::new(self.next_id()),
                    session,
                    option,
                    polarity,
                };
                self.votes.insert(vote.id, vote);
                slot.insert(vote.id);
                Ok(VoteChange::Created(vote))
            }
        }
    }

    async fn get_vote(&self, id: VoteId) -> Result<UserVote, DomainError> {
        self.votes
            .get(&id)
            .map(|v| *v)
            .ok_or_else(|| DomainError::not_found("vote", id))
    }

    async fn delete_vote(&self, id: VoteId) -> Result<UserVote, DomainError> {
        let (_, vote) = self
            .votes
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("vote", id))?;
        self.vote_index.remove(&(vote.session, vote.option));
        Ok(vote)
    }

    async fn votes_by_session(&self, session: SessionId) -> Result<Vec<UserVote>, DomainError> {
        Ok(self.sorted_votes(|v| v.session == session))
    }

    async fn votes_in_room(&self, room: RoomId) -> Result<Vec<UserVote>, DomainError> {
        Ok(self.sorted_votes(|v| {
            self.sessions
                .get(&v.session)
                .is_some_and(|s| s.room == room)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn room_with_option(store: &InMemoryVotingStore) -> (SessionId, OptionId) {
        let ballot = store.create_ballot("Lunch").await.unwrap();
        let option = store.create_option(ballot.id, "Pizza").await.unwrap();
        let room = store.create_room(ballot.id).await.unwrap();
        let session = store.create_session(room.id).await.unwrap();
        (session.id, option.id)
    }

    #[tokio::test]
    async fn test_ballot_labels_unique() {
        let store = InMemoryVotingStore::new();
        store.create_ballot("Lunch").await.unwrap();
        let err = store.create_ballot("Lunch").await.unwrap_err();
        assert!(err.is_constraint_violation());
        assert_eq!(store.list_ballots().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_option_labels_unique_per_ballot() {
        let store = InMemoryVotingStore::new();
        let lunch = store.create_ballot("Lunch").await.unwrap();
        let dinner = store.create_ballot("Dinner").await.unwrap();

        store.create_option(lunch.id, "Pizza").await.unwrap();
        store.create_option(dinner.id, "Pizza").await.unwrap();
        let err = store.create_option(lunch.id, "Pizza").await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_find_ballot_by_label() {
        let store = InMemoryVotingStore::new();
        let ballot = store.create_ballot("Lunch").await.unwrap();
        assert_eq!(store.find_ballot("Lunch").await.unwrap(), Some(ballot));
        assert_eq!(store.find_ballot("Brunch").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_options_listed_in_creation_order() {
        let store = InMemoryVotingStore::new();
        let ballot = store.create_ballot("Lunch").await.unwrap();
        for label in ["Pizza", "Sushi", "Tacos", "Curry"] {
            store.create_option(ballot.id, label).await.unwrap();
        }
        let labels: Vec<String> = store
            .options_in_ballot(ballot.id)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Pizza", "Sushi", "Tacos", "Curry"]);
    }

    #[tokio::test]
    async fn test_vote_upsert() {
        let store = InMemoryVotingStore::new();
        let (session, option) = room_with_option(&store).await;

        let created = store.record_vote(session, option, true).await.unwrap();
        assert!(matches!(created, VoteChange::Created(_)));

        let same = store.record_vote(session, option, true).await.unwrap();
        assert_eq!(same, VoteChange::Unchanged(*created.vote()));

        let flipped = store.record_vote(session, option, false).await.unwrap();
        assert!(matches!(
            flipped,
            VoteChange::PolarityChanged { previous: true, .. }
        ));
        assert_eq!(flipped.vote().id, created.vote().id);
        assert_eq!(store.votes_by_session(session).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_collapse_to_one_vote() {
        let store = std::sync::Arc::new(InMemoryVotingStore::new());
        let (session, option) = room_with_option(&store).await;

        let writes = (0..8).map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.record_vote(session, option, true).await })
        });
        let created = futures::future::join_all(writes)
            .await
            .into_iter()
            .map(|r| r.unwrap().unwrap())
            .filter(|c| matches!(c, VoteChange::Created(_)))
            .count();

        assert_eq!(created, 1);
        assert_eq!(store.votes_by_session(session).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_vote_allows_fresh_vote() {
        let store = InMemoryVotingStore::new();
        let (session, option) = room_with_option(&store).await;

        let vote = *store
            .record_vote(session, option, true)
            .await
            .unwrap()
            .vote();
        store.delete_vote(vote.id).await.unwrap();

        let again = store.record_vote(session, option, true).await.unwrap();
        assert!(matches!(again, VoteChange::Created(_)));
        assert_ne!(again.vote().id, vote.id);
    }

    #[tokio::test]
    async fn test_delete_option_cascades_votes() {
        let store = InMemoryVotingStore::new();
        let (session, option) = room_with_option(&store).await;
        store.record_vote(session, option, true).await.unwrap();

        store.delete_option(option).await.unwrap();

        assert!(store.votes_by_session(session).await.unwrap().is_empty());
        assert!(store.get_option(option).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_votes_in_room_scoped() {
        let store = InMemoryVotingStore::new();
        let ballot = store.create_ballot("Lunch").await.unwrap();
        let option = store.create_option(ballot.id, "Pizza").await.unwrap();
        let room_a = store.create_room(ballot.id).await.unwrap();
        let room_b = store.create_room(ballot.id).await.unwrap();
        let a = store.create_session(room_a.id).await.unwrap();
        let b = store.create_session(room_b.id).await.unwrap();

        store.record_vote(a.id, option.id, true).await.unwrap();
        store.record_vote(b.id, option.id, false).await.unwrap();

        let votes = store.votes_in_room(room_a.id).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].session, a.id);
    }

    #[tokio::test]
    async fn test_unknown_references_not_found() {
        let store = InMemoryVotingStore::new();
        assert!(
            store
                .create_room(BallotId::new(5))
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            store
                .create_session(RoomId::new(5))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}
