//! Consensus detection
//!
//! An option reaches consensus in a room when **every** session in the room
//! has approved it. A missing vote counts as dissent, and a room with no
//! sessions has no consensus at all.

use crate::ballot::vote::UserVote;
use crate::core::ids::{OptionId, SessionId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// An option every session in the room approved (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusEntry {
    pub id: OptionId,
    /// Number of sessions that approved it (all of them)
    pub approvals: usize,
}

/// Intersect the per-session approval sets of a room.
///
/// `options` limits the result to the room's ballot and fixes its order
/// (creation order). Votes from sessions outside `sessions` are ignored.
pub fn detect_consensus(
    options: &[OptionId],
    sessions: &[SessionId],
    votes: &[UserVote],
) -> Vec<ConsensusEntry> {
    if sessions.is_empty() {
        return Vec::new();
    }

    let mut approved_by: HashMap<SessionId, HashSet<OptionId>> = sessions
        .iter()
        .map(|session| (*session, HashSet::new()))
        .collect();

    for vote in votes.iter().filter(|v| v.polarity) {
        if let Some(approved) = approved_by.get_mut(&vote.session) {
            approved.insert(vote.option);
        }
    }

    let mut ordered: Vec<OptionId> = options.to_vec();
    ordered.sort();
    ordered.dedup();

    ordered
        .into_iter()
        .filter(|option| approved_by.values().all(|approved| approved.contains(option)))
        .map(|id| ConsensusEntry {
            id,
            approvals: sessions.len(),
        })
        .collect()
}
