//! Vote types
//!
//! A [`UserVote`] is one session's yes/no decision on one option. There is at
//! most one vote per (session, option); re-voting updates it in place and the
//! store reports what actually happened as a [`VoteChange`].

use crate::core::ids::{OptionId, SessionId, VoteId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One session's yes/no decision on one option (Entity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserVote {
    pub id: VoteId,
    pub session: SessionId,
    pub option: OptionId,
    /// `true` approves, `false` rejects
    pub polarity: bool,
}

/// What a vote write did to the stored state
///
/// Only a [`VoteChange::Created`] or [`VoteChange::PolarityChanged`] write is a
/// genuine change that feeds the correlation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteChange {
    /// No prior vote existed for this (session, option)
    Created(UserVote),
    /// A prior vote existed with the opposite polarity
    PolarityChanged { vote: UserVote, previous: bool },
    /// A prior vote existed with the same polarity; nothing was written
    Unchanged(UserVote),
}

impl VoteChange {
    /// The vote as stored after the write
    pub fn vote(&self) -> &UserVote {
        match self {
            VoteChange::Created(vote)
            | VoteChange::PolarityChanged { vote, .. }
            | VoteChange::Unchanged(vote) => vote,
        }
    }

    /// Whether this write should trigger correlation updates
    pub fn is_genuine(&self) -> bool {
        !matches!(self, VoteChange::Unchanged(_))
    }

    /// Short label for logs and audit events
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChange::Created(_) => "created",
            VoteChange::PolarityChanged { .. } => "polarity_changed",
            VoteChange::Unchanged(_) => "unchanged",
        }
    }
}

/// A session's votes keyed by option.
///
/// This is the lookup the update rule and the scorers consult instead of
/// re-deriving "what did this session vote" per correlation row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionVotes {
    by_option: HashMap<OptionId, bool>,
}

impl SessionVotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Polarity this session cast on `option`, if any
    pub fn polarity(&self, option: OptionId) -> Option<bool> {
        self.by_option.get(&option).copied()
    }

    pub fn has_voted(&self, option: OptionId) -> bool {
        self.by_option.contains_key(&option)
    }

    pub fn insert(&mut self, option: OptionId, polarity: bool) {
        self.by_option.insert(option, polarity);
    }

    pub fn len(&self) -> usize {
        self.by_option.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_option.is_empty()
    }

    /// Iterate (option, polarity) pairs in option creation order
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, bool)> + '_ {
        let mut pairs: Vec<_> = self.by_option.iter().map(|(o, p)| (*o, *p)).collect();
        pairs.sort_by_key(|(option, _)| *option);
        pairs.into_iter()
    }
}

impl<'a> FromIterator<&'a UserVote> for SessionVotes {
    fn from_iter<I: IntoIterator<Item = &'a UserVote>>(iter: I) -> Self {
        let mut votes = SessionVotes::new();
        for vote in iter {
            votes.insert(vote.option, vote.polarity);
        }
        votes
    }
}

impl FromIterator<(OptionId, bool)> for SessionVotes {
    fn from_iter<I: IntoIterator<Item = (OptionId, bool)>>(iter: I) -> Self {
        Self {
            by_option: iter.into_iter().collect(),
        }
    }
}
