//! In-memory correlation store
//!
//! Rows live in a `DashMap` keyed by [`CorrelationKey`]. An EMA step runs
//! while the row's shard is write-locked, so concurrent steps on one row
//! never lose each other; steps on different rows only contend when they
//! hash to the same shard.
//!
//! A second map records which options share rows, so snapshots and removals
//! only visit the rows of the options involved. No guard on one map is held
//! while the other is touched.

use async_trait::async_trait;
use concord_application::CorrelationRepository;
use concord_domain::{
    Correlation, CorrelationKey, CorrelationTable, DomainError, OptionId, initial_keys,
};
use dashmap::DashMap;
use std::collections::HashSet;
use tracing::{debug, trace};

/// In-memory [`CorrelationRepository`]
#[derive(Default)]
pub struct InMemoryCorrelationStore {
    rows: DashMap<CorrelationKey, Correlation>,
    partners: DashMap<OptionId, HashSet<OptionId>>,
}

impl InMemoryCorrelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn partners_of(&self, option: OptionId) -> Vec<OptionId> {
        self.partners
            .get(&option)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CorrelationRepository for InMemoryCorrelationStore {
    async fn initialize_option_correlations(
        &self,
        new_option: OptionId,
        existing: &[OptionId],
    ) -> Result<usize, DomainError> {
        let keys = initial_keys(new_option, existing);
        if keys.is_empty() {
            return Ok(0);
        }

        // Callers hold the ballot barrier, so nothing else inserts these keys
        // between the check and the write.
        if let Some(taken) = keys.iter().find(|key| self.rows.contains_key(key)) {
            return Err(DomainError::constraint(format!(
                "correlation row {} already exists",
                taken
            )));
        }

        for key in &keys {
            self.rows.insert(*key, Correlation::default());
        }
        for key in &keys {
            self.partners
                .entry(key.predicate)
                .or_default()
                .insert(key.target);
        }
        debug!(
            "Inserted {} neutral rows for option {}",
            keys.len(),
            new_option
        );
        Ok(keys.len())
    }

    async fn get_correlation(&self, key: &CorrelationKey) -> Result<Correlation, DomainError> {
        self.rows
            .get(key)
            .map(|row| *row)
            .ok_or_else(|| DomainError::not_found("correlation", key))
    }

    async fn update_correlation_ema(
        &self,
        key: &CorrelationKey,
        observed: f64,
    ) -> Result<Correlation, DomainError> {
        let mut row = self
            .rows
            .get_mut(key)
            .ok_or_else(|| DomainError::not_found("correlation", key))?;
        row.apply_ema(observed);
        trace!("EMA step on {}: {:.4} (n={})", key, row.value, row.count);
        Ok(*row)
    }

    async fn snapshot(&self, options: &[OptionId]) -> Result<CorrelationTable, DomainError> {
        let wanted: HashSet<OptionId> = options.iter().copied().collect();
        let mut table = CorrelationTable::new();
        for &predicate in &wanted {
            for target in self.partners_of(predicate) {
                if !wanted.contains(&target) {
                    continue;
                }
                for polarity in [true, false] {
                    let key = CorrelationKey::new(predicate, polarity, target);
                    if let Some(row) = self.rows.get(&key) {
                        table.insert(key, *row);
                    }
                }
            }
        }
        Ok(table)
    }

    async fn remove_option(&self, option: OptionId) -> Result<usize, DomainError> {
        let partners = self
            .partners
            .remove(&option)
            .map(|(_, set)| set)
            .unwrap_or_default();
        let mut removed = 0;
        for partner in partners {
            if let Some(mut set) = self.partners.get_mut(&partner) {
                set.remove(&option);
            }
            for polarity in [true, false] {
                for key in [
                    CorrelationKey::new(option, polarity, partner),
                    CorrelationKey::new(partner, polarity, option),
                ] {
                    if self.rows.remove(&key).is_some() {
                        removed += 1;
                    }
                }
            }
        }
        Ok(removed)
    }

    async fn row_count(&self) -> usize {
        self.rows.len()
    }
}
