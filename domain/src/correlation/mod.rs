//! Pairwise option-correlation model
//!
//! Every ordered pair of distinct options in a ballot owns four rows (two
//! directions, two predicate polarities). Rows start neutral and drift by an
//! exponential moving average as sessions vote on both sides of a pair.
//!
//! ```text
//!   option created ──► initial_keys ──► 4 rows / existing option @ 0.5
//!   vote recorded  ──► plan_vote_updates ──► EMA step per touched row
//! ```

pub mod entities;
pub mod rule;
pub mod table;

pub use entities::{
    Correlation, CorrelationKey, EMA_WEIGHT, NEUTRAL_CORRELATION, observed_score,
};
pub use rule::{CorrelationUpdate, initial_keys, plan_vote_updates};
pub use table::CorrelationTable;
