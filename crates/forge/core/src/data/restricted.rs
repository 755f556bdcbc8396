//! Data store wrapper that hides a set of protected keys.

use std::collections::BTreeSet;

use tracing::debug;

use super::store::{DataStore, DataView};
use super::value::DataValue;
use crate::keys::DataKey;

/// Mutable access to a store where protected keys are invisible.
///
/// Writes to a protected key are silently dropped and reads of a protected
/// key return the type's default. The owning subsystem keeps direct access
/// to the underlying store; only generic editors receive this wrapper.
pub struct RestrictedData<'a> {
    inner: &'a mut dyn DataStore,
    protected: &'a BTreeSet<DataKey>,
}

impl<'a> RestrictedData<'a> {
    pub fn new(inner: &'a mut dyn DataStore, protected: &'a BTreeSet<DataKey>) -> Self {
        Self { inner, protected }
    }

    pub fn is_protected(&self, key: &DataKey) -> bool {
        self.protected.contains(key)
    }
}

impl DataView for RestrictedData<'_> {
    fn get(&self, key: &DataKey) -> Option<&DataValue> {
        if self.is_protected(key) {
            return None;
        }
        self.inner.get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &DataKey> + '_> {
        Box::new(self.inner.keys().filter(|key| !self.protected.contains(*key)))
    }

    fn len(&self) -> usize {
        self.keys().count()
    }
}

impl DataStore for RestrictedData<'_> {
    fn put(&mut self, key: DataKey, value: DataValue) -> Option<DataValue> {
        if self.is_protected(&key) {
            debug!(target: "forge::data", key = %key, "ignored write to protected key");
            return None;
        }
        self.inner.put(key, value)
    }

    fn remove(&mut self, key: &DataKey) -> Option<DataValue> {
        if self.is_protected(key) {
            debug!(target: "forge::data", key = %key, "ignored removal of protected key");
            return None;
        }
        self.inner.remove(key)
    }
}
