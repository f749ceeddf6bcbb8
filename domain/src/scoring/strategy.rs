//! Scoring strategies for candidate options.
//!
//! # Likelihood (suggest)
//!
//! ```text
//! likelihood(T) = mean{ corr(P, pol, T) : S did not vote P, or S voted pol on P }
//! ```
//!
//! Rows whose predicate polarity contradicts the session's vote are left
//! out. With no informative rows the likelihood is neutral (0.5).
//!
//! # Significance (explore)
//!
//! ```text
//! weight(T)       = 1 - 2 * |0.5 - likelihood(T)|
//! spread(T)       = mean{ |corr(T, +, O) - corr(T, -, O)| : S did not vote O }
//! significance(T) = weight(T) * spread(T)
//! ```
//!
//! # Ranking
//!
//! Descending by score. Equal scores keep option creation order.

use super::mode::SuggestionMode;
use crate::ballot::vote::SessionVotes;
use crate::core::ids::OptionId;
use crate::correlation::{CorrelationKey, CorrelationTable, NEUTRAL_CORRELATION};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A ranked candidate option (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: OptionId,
    pub score: f64,
}

/// Everything a strategy needs to score one session's candidates
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    /// Every option of the session's ballot
    pub options: &'a [OptionId],
    /// The requesting session's votes
    pub session_votes: &'a SessionVotes,
    /// Correlation rows among the ballot's options
    pub correlations: &'a CorrelationTable,
    /// Options some other session in the room voted against
    pub rejected_in_room: &'a HashSet<OptionId>,
}

/// Estimated probability that the session approves `target`
pub fn likelihood(target: OptionId, votes: &SessionVotes, table: &CorrelationTable) -> f64 {
    let (sum, count) = table
        .rows_targeting(target)
        .filter(|(key, _)| match votes.polarity(key.predicate) {
            None => true,
            Some(cast) => cast == key.predicate_polarity,
        })
        .fold((0.0, 0usize), |(sum, count), (_, row)| {
            (sum + row.value, count + 1)
        });

    if count == 0 {
        NEUTRAL_CORRELATION
    } else {
        sum / count as f64
    }
}

/// Mean swing in predictions about un-voted options between voting `option`
/// up or down
pub fn spread(option: OptionId, votes: &SessionVotes, table: &CorrelationTable) -> f64 {
    let (sum, count) = table
        .rows_from(option, true)
        .filter(|(key, _)| !votes.has_voted(key.target))
        .filter_map(|(key, approved)| {
            table
                .get(&CorrelationKey::new(option, false, key.target))
                .map(|rejected| (approved.value - rejected.value).abs())
        })
        .fold((0.0, 0usize), |(sum, count), diff| (sum + diff, count + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Information value of asking the session about `option`
pub fn significance(option: OptionId, votes: &SessionVotes, table: &CorrelationTable) -> f64 {
    let weight = 1.0 - 2.0 * (0.5 - likelihood(option, votes, table)).abs();
    (weight * spread(option, votes, table)).clamp(0.0, 1.0)
}

/// Score and rank the session's candidates under `mode`.
///
/// Candidates are the ballot options the session has not voted on. In
/// [`SuggestionMode::Suggest`], options rejected elsewhere in the room are
/// withheld as well.
pub fn score_candidates(mode: SuggestionMode, input: ScoringInput<'_>) -> Vec<Suggestion> {
    let mut candidates: Vec<OptionId> = input
        .options
        .iter()
        .copied()
        .filter(|option| !input.session_votes.has_voted(*option))
        .collect();
    candidates.sort();
    candidates.dedup();

    let scored = match mode {
        SuggestionMode::Suggest => candidates
            .into_iter()
            .filter(|option| !input.rejected_in_room.contains(option))
            .map(|id| Suggestion {
                id,
                score: likelihood(id, input.session_votes, input.correlations),
            })
            .collect(),
        SuggestionMode::Explore => candidates
            .into_iter()
            .map(|id| Suggestion {
                id,
                score: significance(id, input.session_votes, input.correlations),
            })
            .collect(),
    };

    rank(scored)
}

/// Sort descending by score; the sort is stable so ties keep input order
pub fn rank(mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions
}
