//! Correlation rows
//!
//! A row keyed by (predicate, predicate polarity, target) estimates the
//! probability that a session approves `target` given that it voted
//! `predicate_polarity` on `predicate`.

use crate::core::ids::OptionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight given to the stored value on every EMA step.
///
/// Higher values drift slower and are steadier under noisy votes.
pub const EMA_WEIGHT: f64 = 0.95;

/// Value every row starts at: no information either way.
pub const NEUTRAL_CORRELATION: f64 = 0.5;

/// Unique key of a correlation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CorrelationKey {
    pub predicate: OptionId,
    pub predicate_polarity: bool,
    pub target: OptionId,
}

impl CorrelationKey {
    pub fn new(predicate: OptionId, predicate_polarity: bool, target: OptionId) -> Self {
        Self {
            predicate,
            predicate_polarity,
            target,
        }
    }

    /// Whether `option` sits on either side of this key
    pub fn involves(&self, option: OptionId) -> bool {
        self.predicate == option || self.target == option
    }
}

impl fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.predicate_polarity { '+' } else { '-' };
        write!(f, "{}{} -> {}", sign, self.predicate, self.target)
    }
}

/// Stored state of a correlation row (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Estimated approval probability, always within [0, 1]
    pub value: f64,
    /// Number of EMA updates applied so far
    pub count: u64,
}

impl Default for Correlation {
    fn default() -> Self {
        Self {
            value: NEUTRAL_CORRELATION,
            count: 0,
        }
    }
}

impl Correlation {
    /// Create a row state, clamping `value` into [0, 1]
    pub fn new(value: f64, count: u64) -> Self {
        Self {
            value: clamp_unit(value),
            count,
        }
    }

    /// Fold one observation into the estimate.
    ///
    /// `value = value * W + observed * (1 - W)`, then clamped back into
    /// [0, 1] to absorb rounding drift.
    pub fn apply_ema(&mut self, observed: f64) {
        let next = self.value * EMA_WEIGHT + observed * (1.0 - EMA_WEIGHT);
        self.value = clamp_unit(next);
        self.count += 1;
    }
}

/// Observation score for a target vote: 1.0 for approval, 0.0 otherwise
pub fn observed_score(target_polarity: bool) -> f64 {
    if target_polarity { 1.0 } else { 0.0 }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        NEUTRAL_CORRELATION
    } else {
        value.clamp(0.0, 1.0)
    }
}
