//! Simple port implementations for use case tests.

use crate::ports::correlation_repository::CorrelationRepository;
use crate::ports::vote_event_logger::{VoteEvent, VoteEventLogger};
use crate::ports::voting_repository::VotingRepository;
use async_trait::async_trait;
use concord_domain::{
    Ballot, BallotId, BallotOption, Correlation, CorrelationKey, CorrelationTable, DomainError,
    OptionId, Room, RoomId, SessionId, UserVote, VoteChange, VoteId, VotingSession, initial_keys,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct Records {
    next_id: u64,
    ballots: Vec<Ballot>,
    options: Vec<BallotOption>,
    rooms: Vec<Room>,
    sessions: Vec<VotingSession>,
    votes: Vec<UserVote>,
}

impl Records {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryVoting {
    records: Mutex<Records>,
}

#[async_trait]
impl VotingRepository for MemoryVoting {
    async fn create_ballot(&self, label: &str) -> Result<Ballot, DomainError> {
        let mut r = self.records.lock().unwrap();
        if r.ballots.iter().any(|b| b.label == label) {
            return Err(DomainError::constraint("duplicate ballot"));
        }
        let ballot = Ballot {
            id: BallotId::new(r.next()),
            label: label.to_string(),
        };
        r.ballots.push(ballot.clone());
        Ok(ballot)
    }

    async fn get_ballot(&self, id: BallotId) -> Result<Ballot, DomainError> {
        let r = self.records.lock().unwrap();
        r.ballots
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("ballot", id))
    }

    async fn find_ballot(&self, label: &str) -> Result<Option<Ballot>, DomainError> {
        let r = self.records.lock().unwrap();
        Ok(r.ballots.iter().find(|b| b.label == label).cloned())
    }

    async fn list_ballots(&self) -> Result<Vec<Ballot>, DomainError> {
        Ok(self.records.lock().unwrap().ballots.clone())
    }

    async fn create_option(
        &self,
        ballot: BallotId,
        label: &str,
    ) -> Result<BallotOption, DomainError> {
        let mut r = self.records.lock().unwrap();
        let option = BallotOption {
            id: OptionId::new(r.next()),
            ballot,
            label: label.to_string(),
        };
        r.options.push(option.clone());
        Ok(option)
    }

    async fn get_option(&self, id: OptionId) -> Result<BallotOption, DomainError> {
        let r = self.records.lock().unwrap();
        r.options
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("option", id))
    }

    async fn options_in_ballot(&self, ballot: BallotId) -> Result<Vec<BallotOption>, DomainError> {
        let r = self.records.lock().unwrap();
        Ok(r.options.iter().filter(|o| o.ballot == ballot).cloned().collect())
    }

    async fn delete_option(&self, id: OptionId) -> Result<BallotOption, DomainError> {
        let mut r = self.records.lock().unwrap();
        let pos = r
            .options
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| DomainError::not_found("option", id))?;
        r.votes.retain(|v| v.option != id);
        Ok(r.options.remove(pos))
    }

    async fn create_room(&self, ballot: BallotId) -> Result<Room, DomainError> {
        let mut r = self.records.lock().unwrap();
        let room = Room {
            id: RoomId::new(r.next()),
            ballot,
        };
        r.rooms.push(room);
        Ok(room)
    }

    async fn get_room(&self, id: RoomId) -> Result<Room, DomainError> {
        let r = self.records.lock().unwrap();
        r.rooms
            .iter()
            .find(|room| room.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("room", id))
    }

    async fn create_session(&self, room: RoomId) -> Result<VotingSession, DomainError> {
        let mut r = self.records.lock().unwrap();
        let session = VotingSession {
            id: SessionId::new(r.next()),
            room,
        };
        r.sessions.push(session);
        Ok(session)
    }

    async fn get_session(&self, id: SessionId) -> Result<VotingSession, DomainError> {
        let r = self.records.lock().unwrap();
        r.sessions
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("session", id))
    }

    async fn sessions_in_room(&self, room: RoomId) -> Result<Vec<VotingSession>, DomainError> {
        let r = self.records.lock().unwrap();
        Ok(r.sessions.iter().filter(|s| s.room == room).cloned().collect())
    }

    async fn record_vote(
        &self,
        session: SessionId,
        option: OptionId,
        polarity: bool,
    ) -> Result<VoteChange, DomainError> {
        let mut r = self.records.lock().unwrap();
        if let Some(vote) = r
            .votes
            .iter_mut()
            .find(|v| v.session == session && v.option == option)
        {
            if vote.polarity == polarity {
                return Ok(VoteChange::Unchanged(*vote));
            }
            vote.polarity = polarity;
            return Ok(VoteChange::PolarityChanged {
                vote: *vote,
                previous: !polarity,
            });
        }
        let vote = UserVote {
            id: VoteId::new(r.next()),
            session,
            option,
            polarity,
        };
        r.votes.push(vote);
        Ok(VoteChange::Created(vote))
    }

    async fn get_vote(&self, id: VoteId) -> Result<UserVote, DomainError> {
        let r = self.records.lock().unwrap();
        r.votes
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("vote", id))
    }

    async fn delete_vote(&self, id: VoteId) -> Result<UserVote, DomainError> {
        let mut r = self.records.lock().unwrap();
        let pos = r
            .votes
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| DomainError::not_found("vote", id))?;
        Ok(r.votes.remove(pos))
    }

    async fn votes_by_session(&self, session: SessionId) -> Result<Vec<UserVote>, DomainError> {
        let r = self.records.lock().unwrap();
        Ok(r.votes.iter().filter(|v| v.session == session).cloned().collect())
    }

    async fn votes_in_room(&self, room: RoomId) -> Result<Vec<UserVote>, DomainError> {
        let r = self.records.lock().unwrap();
        let sessions: Vec<SessionId> = r
            .sessions
            .iter()
            .filter(|s| s.room == room)
            .map(|s| s.id)
            .collect();
        Ok(r
            .votes
            .iter()
            .filter(|v| sessions.contains(&v.session))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryCorrelations {
    rows: Mutex<BTreeMap<CorrelationKey, Correlation>>,
}

impl MemoryCorrelations {
    pub fn value(&self, key: CorrelationKey) -> f64 {
        self.rows.lock().unwrap()[&key].value
    }
}

#[async_trait]
impl CorrelationRepository for MemoryCorrelations {
    async fn initialize_option_correlations(
        &self,
        new_option: OptionId,
        existing: &[OptionId],
    ) -> Result<usize, DomainError> {
        let keys = initial_keys(new_option, existing);
        let mut rows = self.rows.lock().unwrap();
        if let Some(key) = keys.iter().find(|k| rows.contains_key(k)) {
            return Err(DomainError::constraint(format!("duplicate key {}", key)));
        }
        for key in &keys {
            rows.insert(*key, Correlation::default());
        }
        Ok(keys.len())
    }

    async fn get_correlation(&self, key: &CorrelationKey) -> Result<Correlation, DomainError> {
        self.rows
            .lock()
            .unwrap()
            .get(key)
            .copied()
            .ok_or_else(|| DomainError::not_found("correlation", key))
    }

    async fn update_correlation_ema(
        &self,
        key: &CorrelationKey,
        observed: f64,
    ) -> Result<Correlation, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .get_mut(key)
            .ok_or_else(|| DomainError::not_found("correlation", key))?;
        row.apply_ema(observed);
        Ok(*row)
    }

    async fn snapshot(&self, options: &[OptionId]) -> Result<CorrelationTable, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|(k, _)| options.contains(&k.predicate) && options.contains(&k.target))
            .map(|(k, c)| (*k, *c))
            .collect())
    }

    async fn remove_option(&self, option: OptionId) -> Result<usize, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|k, _| !k.involves(option));
        Ok(before - rows.len())
    }

    async fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

/// Collects event types in order
#[derive(Default)]
pub struct RecordingEvents {
    pub events: Mutex<Vec<&'static str>>,
}

impl RecordingEvents {
    pub fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl VoteEventLogger for RecordingEvents {
    fn log(&self, event: VoteEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
