//! Read-only snapshot of correlation rows.
//!
//! Scorers work on a [`CorrelationTable`] handed to them by the application
//! layer, so scoring never holds a lock on the live store.

use super::entities::{Correlation, CorrelationKey};
use crate::core::ids::OptionId;
use std::collections::{BTreeMap, BTreeSet};

/// Correlation rows ordered by (predicate, polarity, target)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationTable {
    rows: BTreeMap<CorrelationKey, Correlation>,
    by_target: BTreeMap<OptionId, BTreeSet<CorrelationKey>>,
}

impl CorrelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: CorrelationKey, correlation: Correlation) {
        self.by_target.entry(key.target).or_default().insert(key);
        self.rows.insert(key, correlation);
    }

    pub fn get(&self, key: &CorrelationKey) -> Option<Correlation> {
        self.rows.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose target is `target`
    pub fn rows_targeting(
        &self,
        target: OptionId,
    ) -> impl Iterator<Item = (&CorrelationKey, &Correlation)> {
        self.by_target
            .get(&target)
            .into_iter()
            .flatten()
            .filter_map(|key| self.rows.get_key_value(key))
    }

    /// Rows whose predicate is `predicate` with the given polarity
    pub fn rows_from(
        &self,
        predicate: OptionId,
        polarity: bool,
    ) -> impl Iterator<Item = (&CorrelationKey, &Correlation)> {
        let first = CorrelationKey::new(predicate, polarity, OptionId::new(0));
        let last = CorrelationKey::new(predicate, polarity, OptionId::new(u64::MAX));
        self.rows.range(first..=last)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CorrelationKey, &Correlation)> {
        self.rows.iter()
    }
}

impl FromIterator<(CorrelationKey, Correlation)> for CorrelationTable {
    fn from_iter<I: IntoIterator<Item = (CorrelationKey, Correlation)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, correlation) in iter {
            table.insert(key, correlation);
        }
        table
    }
}
