//! Suggestion scoring.
//!
//! - [`mode::SuggestionMode`]: `suggest` (likelihood) or `explore` (significance)
//! - [`strategy`]: the two scoring functions and the ranking policy

pub mod mode;
pub mod strategy;

pub use mode::SuggestionMode;
pub use strategy::{
    ScoringInput, Suggestion, likelihood, rank, score_candidates, significance, spread,
};
