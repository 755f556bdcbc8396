//! Behavior modules and the per-artifact module entry list.
//!
//! Entries only carry a [`ModuleId`](crate::keys::ModuleId); modules are
//! resolved through the [`ModuleRegistry`] whenever they are needed.

mod builder;
mod condition;
mod definition;
mod entry;
mod leveling;
mod list;
mod registry;

pub use builder::ModuleListBuilder;
pub use condition::{ConditionContext, ModuleCondition};
pub use definition::{BehaviorModule, BehaviorModuleBuilder, Capability, Contribution};
pub use entry::{EntryError, ModuleEntry, Progress};
pub use leveling::LevelingValue;
pub use list::ModuleList;
pub use registry::{ModuleRegistry, ModuleRegistryBuilder, RegistryError};
