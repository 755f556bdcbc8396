use std::collections::BTreeMap;

use super::key::{self, FloatStat, StatKey, StatKeyError, TierStat};
use crate::keys::StatId;

/// Every stat key known to the current configuration.
///
/// Iteration is in id order so that the multiplier pass visits stats
/// deterministically.
#[derive(Clone, Debug, Default)]
pub struct StatCatalog {
    stats: BTreeMap<StatId, StatKey>,
}

impl StatCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog holding only the built-in stats.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for stat in key::builtin() {
            catalog.stats.insert(stat.id().clone(), stat);
        }
        catalog
    }

    pub fn register(&mut self, stat: impl Into<StatKey>) -> Result<(), StatKeyError> {
        let stat = stat.into();
        if self.stats.contains_key(stat.id()) {
            return Err(StatKeyError::Duplicate(stat.id().clone()));
        }
        self.stats.insert(stat.id().clone(), stat);
        Ok(())
    }

    pub fn get(&self, id: &StatId) -> Option<&StatKey> {
        self.stats.get(id)
    }

    pub fn float(&self, id: &StatId) -> Option<&FloatStat> {
        self.get(id).and_then(StatKey::as_float)
    }

    pub fn tier(&self, id: &StatId) -> Option<&TierStat> {
        self.get(id).and_then(StatKey::as_tier)
    }

    pub fn floats(&self) -> impl Iterator<Item = &FloatStat> {
        self.stats.values().filter_map(StatKey::as_float)
    }

    pub fn tiers(&self) -> impl Iterator<Item = &TierStat> {
        self.stats.values().filter_map(StatKey::as_tier)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}
