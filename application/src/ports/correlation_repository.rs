//! Correlation store port
//!
//! The correlation store exclusively owns correlation rows. Row updates must
//! be atomic per key: two EMA steps on the same row may never lose one
//! another.

use async_trait::async_trait;
use concord_domain::{Correlation, CorrelationKey, CorrelationTable, DomainError, OptionId};

/// Store for pairwise option correlations
#[async_trait]
pub trait CorrelationRepository: Send + Sync {
    /// Create the four neutral rows between `new_option` and each of
    /// `existing` (options created strictly before it).
    ///
    /// No-op for an empty `existing`. A key that already exists is a
    /// [`DomainError::ConstraintViolation`] and nothing is written.
    /// Returns the number of rows created.
    async fn initialize_option_correlations(
        &self,
        new_option: OptionId,
        existing: &[OptionId],
    ) -> Result<usize, DomainError>;

    /// Read one row; an absent key is [`DomainError::NotFound`]
    async fn get_correlation(&self, key: &CorrelationKey) -> Result<Correlation, DomainError>;

    /// Apply one EMA step with the given observation and bump the count.
    ///
    /// Returns the row state after the update.
    async fn update_correlation_ema(
        &self,
        key: &CorrelationKey,
        observed: f64,
    ) -> Result<Correlation, DomainError>;

    /// Copy of every row whose predicate and target are both in `options`
    async fn snapshot(&self, options: &[OptionId]) -> Result<CorrelationTable, DomainError>;

    /// Drop every row the option takes part in; returns how many went away
    async fn remove_option(&self, option: OptionId) -> Result<usize, DomainError>;

    /// Total number of rows held
    async fn row_count(&self) -> usize;
}
