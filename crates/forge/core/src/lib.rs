//! Deterministic composition engine for modular artifacts.
//!
//! `forge-core` turns an artifact's serialized inputs (materials, upgrade
//! entries, persisted data) into a queryable state: an ordered module list, a
//! per-artifact hook map, volatile data, and a two-layer stat snapshot. All
//! rebuilds flow through [`artifact::rebuild`], and every read goes through
//! [`ArtifactView`].
//!
//! Shared configuration ([`ModuleRegistry`], [`MaterialCatalog`],
//! [`StatCatalog`], [`EngineConfig`]) is built once, bundled in a
//! [`ForgeEnv`], and read concurrently by any number of artifact owners.
pub mod artifact;
pub mod config;
pub mod data;
pub mod env;
pub mod error;
pub mod hooks;
pub mod keys;
pub mod module;
pub mod stats;

pub use artifact::{
    Artifact, ArtifactData, ArtifactError, ArtifactView, RebuildContext, RebuildError,
    RebuildPhase,
};
pub use config::EngineConfig;
pub use data::{DataStore, DataValue, DataView, ModData, RestrictedData};
pub use env::{ForgeEnv, MaterialCatalog, MaterialDefinition, MaterialOracle};
pub use error::{ErrorSeverity, ForgeError};
pub use hooks::{HookError, HookMap, HookRegistry, HookToken, MergeStrategy};
pub use keys::{DataKey, HookId, Identifier, KeyError, MaterialId, ModuleId, StatId};
pub use module::{
    BehaviorModule, Capability, EntryError, ModuleEntry, ModuleList, ModuleListBuilder,
    ModuleRegistry, RegistryError,
};
pub use stats::{FloatStat, StatCatalog, StatsSnapshot, TierStat};
