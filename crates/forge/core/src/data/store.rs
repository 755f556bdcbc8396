//! Read-only view and mutable store traits, plus the map-backed [`ModData`].

use std::collections::BTreeMap;

use super::value::{Blob, DataType, DataValue};
use crate::keys::DataKey;

static EMPTY_BLOB: Blob = Blob::new();

/// Read-only access to a data store.
///
/// Missing keys (or keys holding a different type) resolve to the type's zero
/// value; reads never fail.
pub trait DataView {
    /// Raw lookup.
    fn get(&self, key: &DataKey) -> Option<&DataValue>;

    /// Keys in ascending order.
    fn keys(&self) -> Box<dyn Iterator<Item = &DataKey> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, key: &DataKey, data_type: DataType) -> bool {
        self.get(key)
            .is_some_and(|value| value.data_type() == data_type)
    }

    fn get_int(&self, key: &DataKey) -> i64 {
        self.get(key).and_then(DataValue::as_int).unwrap_or(0)
    }

    fn get_float(&self, key: &DataKey) -> f64 {
        self.get(key).and_then(DataValue::as_float).unwrap_or(0.0)
    }

    fn get_bool(&self, key: &DataKey) -> bool {
        self.get(key).and_then(DataValue::as_bool).unwrap_or(false)
    }

    fn get_text(&self, key: &DataKey) -> &str {
        self.get(key).and_then(DataValue::as_text).unwrap_or("")
    }

    fn get_list(&self, key: &DataKey) -> &[DataValue] {
        self.get(key).and_then(DataValue::as_list).unwrap_or(&[])
    }

    fn get_blob(&self, key: &DataKey) -> &Blob {
        self.get(key)
            .and_then(DataValue::as_blob)
            .unwrap_or(&EMPTY_BLOB)
    }
}

/// Mutable data store. Only owners of the store (the rebuild pipeline, the
/// artifact itself, restricted editors) ever see this trait.
pub trait DataStore: DataView {
    /// Stores a value, returning the previous one.
    fn put(&mut self, key: DataKey, value: DataValue) -> Option<DataValue>;

    fn remove(&mut self, key: &DataKey) -> Option<DataValue>;

    fn put_int(&mut self, key: DataKey, value: i64) {
        self.put(key, DataValue::Int(value));
    }

    fn put_float(&mut self, key: DataKey, value: f64) {
        self.put(key, DataValue::Float(value));
    }

    fn put_bool(&mut self, key: DataKey, value: bool) {
        self.put(key, DataValue::Bool(value));
    }

    fn put_text(&mut self, key: DataKey, value: &str) {
        self.put(key, DataValue::Text(value.to_owned()));
    }
}

/// Flat, ordered key/value store used for both persisted and volatile data.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModData {
    values: BTreeMap<DataKey, DataValue>,
}

impl ModData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DataKey, &DataValue)> {
        self.values.iter()
    }

    /// Returns this store as a read-only view.
    pub fn as_view(&self) -> &dyn DataView {
        self
    }
}

impl DataView for ModData {
    fn get(&self, key: &DataKey) -> Option<&DataValue> {
        self.values.get(key)
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &DataKey> + '_> {
        Box::new(self.values.keys())
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

impl DataStore for ModData {
    fn put(&mut self, key: DataKey, value: DataValue) -> Option<DataValue> {
        self.values.insert(key, value)
    }

    fn remove(&mut self, key: &DataKey) -> Option<DataValue> {
        self.values.remove(key)
    }
}

impl FromIterator<(DataKey, DataValue)> for ModData {
    fn from_iter<T: IntoIterator<Item = (DataKey, DataValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
