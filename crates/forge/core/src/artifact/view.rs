use crate::data::{DataView, ModData};
use crate::hooks::{HookDispatch, HookMap, HookToken, Merge};
use crate::keys::ModuleId;
use crate::module::{ConditionContext, ModuleList};
use crate::stats::StatsSnapshot;

/// Read-only access to a built artifact.
///
/// Hooks receive this view; it exposes data stores only as [`DataView`] so
/// nothing reached through it can mutate the artifact.
#[derive(Clone, Copy)]
pub struct ArtifactView<'a> {
    modules: &'a ModuleList,
    hooks: &'a HookMap,
    stats: &'a StatsSnapshot,
    persistent: &'a ModData,
    volatile: &'a ModData,
}

impl<'a> ArtifactView<'a> {
    pub(crate) fn new(
        modules: &'a ModuleList,
        hooks: &'a HookMap,
        stats: &'a StatsSnapshot,
        persistent: &'a ModData,
        volatile: &'a ModData,
    ) -> Self {
        Self {
            modules,
            hooks,
            stats,
            persistent,
            volatile,
        }
    }

    pub fn stats(&self) -> &'a StatsSnapshot {
        self.stats
    }

    pub fn persistent_data(&self) -> &'a dyn DataView {
        self.persistent
    }

    pub fn volatile_data(&self) -> &'a dyn DataView {
        self.volatile
    }

    pub fn modules(&self) -> &'a ModuleList {
        self.modules
    }

    pub fn hooks(&self) -> &'a HookMap {
        self.hooks
    }

    /// Level of a module on this artifact, or 0.
    pub fn level(&self, id: &ModuleId) -> u32 {
        self.modules.level(id)
    }

    /// Dispatch proxy for `token`.
    pub fn hook<A: 'static, M: Merge>(&self, token: &HookToken<A, M>) -> HookDispatch<'a, A, M> {
        HookDispatch::new(token, *self)
    }

    pub(crate) fn condition_context(&self) -> ConditionContext<'a> {
        ConditionContext {
            modules: self.modules,
            persistent: self.persistent,
        }
    }
}
