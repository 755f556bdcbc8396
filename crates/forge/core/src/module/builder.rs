use std::cmp::Reverse;

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::entry::{EntryError, ModuleEntry};
use super::list::ModuleList;
use super::registry::ModuleRegistry;
use crate::config::EngineConfig;
use crate::keys::ModuleId;

/// Accumulates entries from several sources (materials, upgrades, recipes)
/// and produces a sorted [`ModuleList`].
///
/// Entries are keyed by module id in first-seen order; that order is the
/// tie-break between modules of equal priority.
#[derive(Clone, Debug, Default)]
pub struct ModuleListBuilder {
    entries: IndexMap<ModuleId, ModuleEntry>,
}

impl ModuleListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, merging with an existing one via [`ModuleEntry::merge`].
    pub fn add(mut self, entry: ModuleEntry) -> Self {
        self.insert(entry);
        self
    }

    pub fn insert(&mut self, entry: ModuleEntry) -> &mut Self {
        self.insert_with(entry, ModuleEntry::merge)
    }

    /// Adds an entry, resolving a duplicate id with `merge(existing, new)`.
    pub fn add_with(
        mut self,
        entry: ModuleEntry,
        merge: impl FnOnce(&ModuleEntry, &ModuleEntry) -> ModuleEntry,
    ) -> Self {
        self.insert_with(entry, merge);
        self
    }

    pub fn insert_with(
        &mut self,
        entry: ModuleEntry,
        merge: impl FnOnce(&ModuleEntry, &ModuleEntry) -> ModuleEntry,
    ) -> &mut Self {
        match self.entries.get_mut(entry.id()) {
            Some(existing) => *existing = merge(existing, &entry),
            None => {
                self.entries.insert(entry.id().clone(), entry);
            }
        }
        self
    }

    pub fn extend<'a>(&mut self, entries: impl IntoIterator<Item = &'a ModuleEntry>) -> &mut Self {
        for entry in entries {
            self.insert(entry.clone());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves every id against `registry`, clamps levels, and sorts by
    /// descending priority.
    ///
    /// Unknown ids are dropped with a warning unless the configuration is
    /// strict, in which case the first one is returned as an error.
    pub fn build(
        self,
        registry: &ModuleRegistry,
        config: &EngineConfig,
    ) -> Result<ModuleList, EntryError> {
        let mut resolved = Vec::with_capacity(self.entries.len());
        for (id, mut entry) in self.entries {
            if entry.level() == 0 {
                continue;
            }

            let Some(module) = registry.get(&id) else {
                if !config.tolerate_unknown_modules {
                    return Err(EntryError::UnknownModule { id });
                }
                warn!(
                    target: "forge::modules",
                    module = %id,
                    level = entry.level(),
                    "dropping entry for unknown module"
                );
                continue;
            };

            let max = module.max_level().min(config.max_level);
            let level = entry.level();
            if entry.clamp_level(max) {
                debug!(
                    target: "forge::modules",
                    module = %id,
                    level,
                    max,
                    "clamped entry to max level"
                );
            }
            resolved.push((module.priority(), entry));
        }

        resolved.sort_by_key(|(priority, _)| Reverse(*priority));
        Ok(ModuleList::from_vec(
            resolved.into_iter().map(|(_, entry)| entry).collect(),
        ))
    }
}
