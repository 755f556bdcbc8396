use crate::data::{DataView, ModData};
use crate::module::{ConditionContext, ModuleList};
use crate::stats::{StatCatalog, StatsBuilder};

/// Mutable state handed to module contributions during a rebuild.
///
/// The module list is final at this point; only data and base stats change.
pub struct RebuildContext<'a> {
    modules: &'a ModuleList,
    persistent: &'a mut ModData,
    volatile: &'a mut ModData,
    stats: &'a mut StatsBuilder,
    catalog: &'a StatCatalog,
}

impl<'a> RebuildContext<'a> {
    pub(crate) fn new(
        modules: &'a ModuleList,
        persistent: &'a mut ModData,
        volatile: &'a mut ModData,
        stats: &'a mut StatsBuilder,
        catalog: &'a StatCatalog,
    ) -> Self {
        Self {
            modules,
            persistent,
            volatile,
            stats,
            catalog,
        }
    }

    pub fn modules(&self) -> &ModuleList {
        self.modules
    }

    /// Durable data. Edits made here are committed if the rebuild succeeds.
    pub fn persistent(&mut self) -> &mut ModData {
        self.persistent
    }

    pub fn persistent_view(&self) -> &dyn DataView {
        &*self.persistent
    }

    /// Data recomputed on every rebuild. Starts empty.
    pub fn volatile(&mut self) -> &mut ModData {
        self.volatile
    }

    pub fn stats(&mut self) -> &mut StatsBuilder {
        self.stats
    }

    pub fn catalog(&self) -> &StatCatalog {
        self.catalog
    }

    pub(crate) fn condition_context(&self) -> ConditionContext<'_> {
        ConditionContext {
            modules: self.modules,
            persistent: &*self.persistent,
        }
    }
}
