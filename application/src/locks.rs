//! Per-ballot and per-session lock registry.
//!
//! Option creation is a barrier for its ballot: it takes the ballot lock
//! exclusively while votes and suggestion reads share it. Vote events of one
//! session are applied one at a time, so the session's vote snapshot used by
//! the update rule always includes every earlier vote and nothing later.
//!
//! Lock order is ballot before session.

use concord_domain::{BallotId, SessionId};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Lazily created async locks keyed by ballot and session
#[derive(Default)]
pub struct LockRegistry {
    ballots: DashMap<BallotId, Arc<RwLock<()>>>,
    sessions: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn ballot_lock(&self, ballot: BallotId) -> Arc<RwLock<()>> {
        self.ballots.entry(ballot).or_default().clone()
    }

    fn session_lock(&self, session: SessionId) -> Arc<Mutex<()>> {
        self.sessions.entry(session).or_default().clone()
    }

    /// Exclusive access to the ballot (option creation / deletion)
    pub async fn write_ballot(&self, ballot: BallotId) -> OwnedRwLockWriteGuard<()> {
        self.ballot_lock(ballot).write_owned().await
    }

    /// Shared access to the ballot (votes, suggestions, consensus)
    pub async fn read_ballot(&self, ballot: BallotId) -> OwnedRwLockReadGuard<()> {
        self.ballot_lock(ballot).read_owned().await
    }

    /// Serialize vote events of one session
    pub async fn lock_session(&self, session: SessionId) -> OwnedMutexGuard<()> {
        self.session_lock(session).lock_owned().await
    }
}
