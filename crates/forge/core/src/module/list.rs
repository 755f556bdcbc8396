use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;

use super::builder::ModuleListBuilder;
use super::entry::{EntryError, ModuleEntry};
use crate::keys::ModuleId;

static EMPTY: LazyLock<ModuleList> = LazyLock::new(|| ModuleList {
    entries: Arc::from(Vec::new()),
});

/// Immutable ordered list of module entries, at most one per module id.
///
/// Lists produced by [`ModuleListBuilder::build`] are sorted by descending
/// priority. The fast-path edits below (`with_level`, `add_progress`,
/// `without_level`) return new lists that keep the existing order and append
/// new ids at the end; pass the result through a builder to re-sort.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<ModuleEntry>", into = "Vec<ModuleEntry>")
)]
pub struct ModuleList {
    entries: Arc<[ModuleEntry]>,
}

impl ModuleList {
    /// The shared empty list.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    /// Wraps entries that are already deduplicated. Order is kept as given.
    pub fn from_entries(entries: Vec<ModuleEntry>) -> Result<Self, EntryError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.level() == 0 {
                return Err(EntryError::ZeroLevel {
                    id: entry.id().clone(),
                });
            }
            if !seen.insert(entry.id()) {
                return Err(EntryError::Duplicate {
                    id: entry.id().clone(),
                });
            }
        }
        Ok(Self::from_vec(entries))
    }

    /// Lenient constructor for stored data: duplicate ids merge, zero levels
    /// are dropped.
    pub fn merged(entries: impl IntoIterator<Item = ModuleEntry>) -> Self {
        let mut merged: IndexMap<ModuleId, ModuleEntry> = IndexMap::new();
        for entry in entries {
            match merged.get_mut(entry.id()) {
                Some(existing) => *existing = existing.merge(&entry),
                None => {
                    merged.insert(entry.id().clone(), entry);
                }
            }
        }
        Self::from_vec(merged.into_values().filter(|e| e.level() > 0).collect())
    }

    pub(crate) fn from_vec(entries: Vec<ModuleEntry>) -> Self {
        if entries.is_empty() {
            return Self::empty();
        }
        Self {
            entries: Arc::from(entries),
        }
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModuleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ModuleEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.get(id).is_some()
    }

    /// Level of `id`, or 0 when absent.
    pub fn level(&self, id: &ModuleId) -> u32 {
        self.get(id).map_or(0, ModuleEntry::level)
    }

    /// Raises `id` by `delta` levels, appending a new entry if absent.
    pub fn with_level(&self, id: &ModuleId, delta: i32) -> Result<Self, EntryError> {
        let levels = u32::try_from(delta)
            .ok()
            .filter(|levels| *levels > 0)
            .ok_or_else(|| EntryError::NonPositiveDelta {
                id: id.clone(),
                delta,
            })?;
        let added = ModuleEntry::new(id.clone(), levels);
        Ok(self.replace_or_append(id, |existing| match existing {
            Some(existing) => existing.merge(&added),
            None => added.clone(),
        }))
    }

    /// Adds incremental progress to `id`. Non-positive inputs are a no-op.
    pub fn add_progress(&self, id: &ModuleId, amount: i32, needed: i32) -> Self {
        let (Ok(amount), Ok(needed)) = (u32::try_from(amount), u32::try_from(needed)) else {
            return self.clone();
        };
        if amount == 0 || needed == 0 {
            return self.clone();
        }
        self.replace_or_append(id, |existing| match existing {
            Some(existing) => existing.add_progress(amount, needed),
            None => ModuleEntry::incremental(id.clone(), 0, amount, needed),
        })
    }

    /// Lowers `id` by `delta` levels. Removing more levels than present stops
    /// at zero and drops the entry. Remaining partial progress is discarded.
    pub fn without_level(&self, id: &ModuleId, delta: u32) -> Self {
        let Some(existing) = self.get(id) else {
            return self.clone();
        };
        if delta == 0 {
            return self.clone();
        }

        let remaining = existing.level().saturating_sub(delta);
        let entries = self
            .entries
            .iter()
            .filter_map(|entry| {
                if entry.id() != id {
                    Some(entry.clone())
                } else if remaining > 0 {
                    Some(entry.with_level(remaining))
                } else {
                    None
                }
            })
            .collect();
        Self::from_vec(entries)
    }

    /// Starts a builder seeded with this list's entries in order.
    pub fn to_builder(&self) -> ModuleListBuilder {
        let mut builder = ModuleListBuilder::new();
        for entry in self.iter() {
            builder.insert(entry.clone());
        }
        builder
    }

    fn replace_or_append(
        &self,
        id: &ModuleId,
        update: impl FnOnce(Option<&ModuleEntry>) -> ModuleEntry,
    ) -> Self {
        let mut entries = self.entries.to_vec();
        match entries.iter().position(|entry| entry.id() == id) {
            Some(index) => {
                let updated = update(Some(&entries[index]));
                entries[index] = updated;
            }
            None => entries.push(update(None)),
        }
        Self::from_vec(entries)
    }
}

impl Default for ModuleList {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for ModuleList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl From<Vec<ModuleEntry>> for ModuleList {
    fn from(entries: Vec<ModuleEntry>) -> Self {
        Self::merged(entries)
    }
}

impl From<ModuleList> for Vec<ModuleEntry> {
    fn from(list: ModuleList) -> Self {
        list.entries.to_vec()
    }
}

impl<'a> IntoIterator for &'a ModuleList {
    type Item = &'a ModuleEntry;
    type IntoIter = std::slice::Iter<'a, ModuleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
