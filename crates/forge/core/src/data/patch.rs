//! Deferred edits to a data store.

use super::store::DataStore;
use super::value::DataValue;
use crate::keys::DataKey;

/// One deferred edit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataEdit {
    Put(DataKey, DataValue),
    Remove(DataKey),
}

/// Ordered list of edits produced by a read-only hook and applied later by
/// the owner of the store.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataPatch {
    edits: Vec<DataEdit>,
}

impl DataPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(mut self, key: DataKey, value: impl Into<DataValue>) -> Self {
        self.edits.push(DataEdit::Put(key, value.into()));
        self
    }

    pub fn remove(mut self, key: DataKey) -> Self {
        self.edits.push(DataEdit::Remove(key));
        self
    }

    pub fn edits(&self) -> &[DataEdit] {
        &self.edits
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Applies every edit in order.
    pub fn apply(&self, store: &mut dyn DataStore) {
        for edit in &self.edits {
            match edit {
                DataEdit::Put(key, value) => {
                    store.put(key.clone(), value.clone());
                }
                DataEdit::Remove(key) => {
                    store.remove(key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataView, ModData};

    const ACTIVE: DataKey = DataKey::from_static("forge:active");
    const MODE: DataKey = DataKey::from_static("forge:mode");

    #[test]
    fn edits_apply_in_order() {
        let mut data = ModData::new();
        data.put_text(MODE, "dig");

        DataPatch::new()
            .put(ACTIVE, true)
            .put(ACTIVE, false)
            .remove(MODE)
            .apply(&mut data);

        assert!(data.contains(&ACTIVE, crate::data::DataType::Bool));
        assert!(!data.get_bool(&ACTIVE));
        assert_eq!(data.get(&MODE), None);
    }
}
