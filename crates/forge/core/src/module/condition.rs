//! Gating predicates evaluated against an artifact and a module's own entry.

use super::entry::ModuleEntry;
use super::list::ModuleList;
use crate::data::DataView;
use crate::keys::{DataKey, ModuleId};

/// Artifact state visible to a condition.
#[derive(Clone, Copy)]
pub struct ConditionContext<'a> {
    pub modules: &'a ModuleList,
    pub persistent: &'a dyn DataView,
}

/// Data-driven predicate over `(artifact, entry)`. A module whose condition
/// fails neither contributes during rebuild nor answers hooks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModuleCondition {
    #[default]
    Always,
    /// The entry's own level is at least this value.
    MinLevel(u32),
    /// The entry's own level is at most this value.
    MaxLevel(u32),
    HasModule(ModuleId),
    LacksModule(ModuleId),
    /// A boolean in the persisted store is set.
    PersistentFlag(DataKey),
    All(Vec<ModuleCondition>),
    Any(Vec<ModuleCondition>),
    Not(Box<ModuleCondition>),
}

impl ModuleCondition {
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    pub fn test(&self, context: &ConditionContext<'_>, entry: &ModuleEntry) -> bool {
        match self {
            Self::Always => true,
            Self::MinLevel(level) => entry.level() >= *level,
            Self::MaxLevel(level) => entry.level() <= *level,
            Self::HasModule(id) => context.modules.contains(id),
            Self::LacksModule(id) => !context.modules.contains(id),
            Self::PersistentFlag(key) => context.persistent.get_bool(key),
            Self::All(conditions) => conditions.iter().all(|c| c.test(context, entry)),
            Self::Any(conditions) => conditions.iter().any(|c| c.test(context, entry)),
            Self::Not(condition) => !condition.test(context, entry),
        }
    }
}
