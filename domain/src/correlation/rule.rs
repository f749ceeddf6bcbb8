//! Correlation row lifecycle rules.
//!
//! Both rules are pure: they decide *which* rows to create or update and
//! with what observation, and leave the writes to the correlation store.
//!
//! # Vote update rule
//!
//! When session `S` casts polarity `p` on option `O`, every other option `C`
//! that `S` already voted `q` on forms a pair. Two rows are touched per pair:
//!
//! ```text
//! (C, q) -> O   observed = score(p)   "given S voted q on C, did S approve O?"
//! (O, p) -> C   observed = score(q)   "given S voted p on O, did S approve C?"
//! ```
//!
//! Rows whose predicate polarity contradicts the session's vote are never
//! touched, and only pairs involving `O` are visited.

use super::entities::{CorrelationKey, observed_score};
use crate::ballot::vote::{SessionVotes, VoteChange};
use crate::core::ids::OptionId;

/// One planned EMA step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationUpdate {
    pub key: CorrelationKey,
    pub observed: f64,
}

/// Keys to create when `new_option` joins a ballot that already holds
/// `existing` options.
///
/// Four rows per existing option: both directions, both predicate
/// polarities. Returns nothing for an empty ballot.
pub fn initial_keys(new_option: OptionId, existing: &[OptionId]) -> Vec<CorrelationKey> {
    existing
        .iter()
        .copied()
        .filter(|e| *e != new_option)
        .flat_map(|e| {
            [
                CorrelationKey::new(e, true, new_option),
                CorrelationKey::new(e, false, new_option),
                CorrelationKey::new(new_option, true, e),
                CorrelationKey::new(new_option, false, e),
            ]
        })
        .collect()
}

/// Updates triggered by a vote write.
///
/// `session_votes` is the session's vote lookup; the voted option itself is
/// skipped if present. Non-genuine writes plan nothing.
pub fn plan_vote_updates(
    change: &VoteChange,
    session_votes: &SessionVotes,
) -> Vec<CorrelationUpdate> {
    if !change.is_genuine() {
        return Vec::new();
    }

    let vote = change.vote();
    let option = vote.option;
    let polarity = vote.polarity;

    session_votes
        .iter()
        .filter(|(counterpart, _)| *counterpart != option)
        .flat_map(|(counterpart, counterpart_polarity)| {
            [
                CorrelationUpdate {
                    key: CorrelationKey::new(counterpart, counterpart_polarity, option),
                    observed: observed_score(polarity),
                },
                CorrelationUpdate {
                    key: CorrelationKey::new(option, polarity, counterpart),
                    observed: observed_score(counterpart_polarity),
                },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::vote::UserVote;
    use crate::core::ids::{SessionId, VoteId};

    fn id(raw: u64) -> OptionId {
        OptionId::new(raw)
    }

    fn created(option: u64, polarity: bool) -> VoteChange {
        VoteChange::Created(UserVote {
            id: VoteId::new(100 + option),
            session: SessionId::new(1),
            option: id(option),
            polarity,
        })
    }

    #[test]
    fn test_initial_keys_empty_ballot() {
        assert!(initial_keys(id(1), &[]).is_empty());
    }

    #[test]
    fn test_initial_keys_four_per_existing_option() {
        let keys = initial_keys(id(3), &[id(1), id(2)]);
        assert_eq!(keys.len(), 8);
        assert!(keys.contains(&CorrelationKey::new(id(1), true, id(3))));
        assert!(keys.contains(&CorrelationKey::new(id(1), false, id(3))));
        assert!(keys.contains(&CorrelationKey::new(id(3), true, id(1))));
        assert!(keys.contains(&CorrelationKey::new(id(3), false, id(1))));
        assert!(keys.iter().all(|k| k.predicate != k.target));
    }

    #[test]
    fn test_initial_keys_skip_self() {
        assert!(initial_keys(id(1), &[id(1)]).is_empty());
    }

    #[test]
    fn test_first_vote_touches_nothing() {
        let votes: SessionVotes = [(id(1), true)].into_iter().collect();
        assert!(plan_vote_updates(&created(1, true), &votes).is_empty());
    }

    #[test]
    fn test_pair_updates_both_directions() {
        let votes: SessionVotes = [(id(1), true), (id(2), false)].into_iter().collect();
        let updates = plan_vote_updates(&created(2, false), &votes);

        assert_eq!(
            updates,
            vec![
                CorrelationUpdate {
                    key: CorrelationKey::new(id(1), true, id(2)),
                    observed: 0.0,
                },
                CorrelationUpdate {
                    key: CorrelationKey::new(id(2), false, id(1)),
                    observed: 1.0,
                },
            ]
        );
    }

    #[test]
    fn test_unchanged_vote_plans_nothing() {
        let votes: SessionVotes = [(id(1), true), (id(2), true)].into_iter().collect();
        let change = VoteChange::Unchanged(*created(2, true).vote());
        assert!(plan_vote_updates(&change, &votes).is_empty());
    }

    #[test]
    fn test_polarity_change_uses_new_polarity() {
        let votes: SessionVotes = [(id(1), true), (id(2), true)].into_iter().collect();
        let change = VoteChange::PolarityChanged {
            vote: *created(2, true).vote(),
            previous: false,
        };
        let updates = plan_vote_updates(&change, &votes);

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].key, CorrelationKey::new(id(1), true, id(2)));
        assert_eq!(updates[0].observed, 1.0);
        assert_eq!(updates[1].key, CorrelationKey::new(id(2), true, id(1)));
    }
}
