//! The behavior module descriptor and its builder.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use super::condition::ModuleCondition;
use super::entry::ModuleEntry;
use crate::artifact::{ArtifactView, RebuildContext};
use crate::config::EngineConfig;
use crate::hooks::{HookError, HookSet, HookToken, Merge};
use crate::keys::{DataKey, ModuleId};

/// Rebuild-time contribution: writes data and base stats for one entry.
pub type Contribution =
    Arc<dyn Fn(&mut RebuildContext<'_>, &ModuleEntry) -> Result<(), HookError> + Send + Sync>;

/// Bundle of hooks and contributions that can be attached to a module.
///
/// A capability declares the tokens it implies once, in `attach`; any module
/// built with it registers for all of them.
pub trait Capability: Send + Sync {
    /// Short name used in logs and tooling.
    fn name(&self) -> &'static str;

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder;
}

/// Immutable, shareable description of one module.
///
/// All per-artifact state lives in the artifact's data stores; a module is
/// built once at load time and read from many artifacts.
pub struct BehaviorModule {
    id: ModuleId,
    priority: i32,
    max_level: u32,
    condition: ModuleCondition,
    protected_keys: BTreeSet<DataKey>,
    capabilities: Vec<&'static str>,
    hooks: HookSet,
    contributions: Vec<Contribution>,
}

impl BehaviorModule {
    /// Priority of modules that do not set one. Higher runs first.
    pub const DEFAULT_PRIORITY: i32 = EngineConfig::DEFAULT_PRIORITY;

    pub fn builder(id: ModuleId) -> BehaviorModuleBuilder {
        BehaviorModuleBuilder::new(id)
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn condition(&self) -> &ModuleCondition {
        &self.condition
    }

    /// Persisted keys owned by this module that generic editors may not touch.
    pub fn protected_keys(&self) -> &BTreeSet<DataKey> {
        &self.protected_keys
    }

    /// Names of the capabilities this module was built from.
    pub fn capabilities(&self) -> &[&'static str] {
        &self.capabilities
    }

    pub fn hooks(&self) -> &HookSet {
        &self.hooks
    }

    pub fn has_contributions(&self) -> bool {
        !self.contributions.is_empty()
    }

    /// Runs every contribution for `entry`, stopping at the first error.
    pub fn contribute(
        &self,
        context: &mut RebuildContext<'_>,
        entry: &ModuleEntry,
    ) -> Result<(), HookError> {
        for contribution in &self.contributions {
            contribution(&mut *context, entry)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BehaviorModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorModule")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("max_level", &self.max_level)
            .field("condition", &self.condition)
            .field("capabilities", &self.capabilities)
            .field("hooks", &self.hooks)
            .field("contributions", &self.contributions.len())
            .finish()
    }
}

pub struct BehaviorModuleBuilder {
    module: BehaviorModule,
}

impl BehaviorModuleBuilder {
    pub fn new(id: ModuleId) -> Self {
        Self {
            module: BehaviorModule {
                id,
                priority: BehaviorModule::DEFAULT_PRIORITY,
                max_level: u32::MAX,
                condition: ModuleCondition::Always,
                protected_keys: BTreeSet::new(),
                capabilities: Vec::new(),
                hooks: HookSet::new(),
                contributions: Vec::new(),
            },
        }
    }

    pub fn id(&self) -> &ModuleId {
        &self.module.id
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.module.priority = priority;
        self
    }

    pub fn max_level(mut self, max_level: u32) -> Self {
        self.module.max_level = max_level;
        self
    }

    pub fn condition(mut self, condition: ModuleCondition) -> Self {
        self.module.condition = condition;
        self
    }

    pub fn protect(mut self, key: DataKey) -> Self {
        self.module.protected_keys.insert(key);
        self
    }

    /// Attaches a hook handler.
    pub fn on<A, M, F>(mut self, token: &HookToken<A, M>, handler: F) -> Self
    where
        A: 'static,
        M: Merge,
        F: Fn(&ArtifactView<'_>, &ModuleEntry, &A) -> Result<M::Item, HookError>
            + Send
            + Sync
            + 'static,
    {
        self.module.hooks.insert(token, handler);
        self
    }

    /// Adds a rebuild contribution. Contributions run in the order added.
    pub fn contribute<F>(mut self, contribution: F) -> Self
    where
        F: Fn(&mut RebuildContext<'_>, &ModuleEntry) -> Result<(), HookError>
            + Send
            + Sync
            + 'static,
    {
        self.module.contributions.push(Arc::new(contribution));
        self
    }

    /// Attaches every hook and contribution a capability implies.
    pub fn with(mut self, capability: Arc<dyn Capability>) -> Self {
        self.module.capabilities.push(capability.name());
        capability.attach(self)
    }

    pub fn build(self) -> BehaviorModule {
        self.module
    }
}
