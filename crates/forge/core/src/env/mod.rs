//! Read-only configuration the engine needs to rebuild artifacts.
//!
//! [`ForgeEnv`] bundles the module registry, material definitions, the stat
//! catalog and the engine config. Everything it references is loaded once and
//! shared across artifacts.

mod materials;

pub use materials::{MaterialCatalog, MaterialDefinition, MaterialOracle, StatContribution};

use crate::config::EngineConfig;
use crate::module::ModuleRegistry;
use crate::stats::StatCatalog;

#[derive(Clone, Copy)]
pub struct ForgeEnv<'a> {
    modules: &'a ModuleRegistry,
    materials: &'a dyn MaterialOracle,
    stats: &'a StatCatalog,
    config: &'a EngineConfig,
}

impl<'a> ForgeEnv<'a> {
    pub fn new(
        modules: &'a ModuleRegistry,
        materials: &'a dyn MaterialOracle,
        stats: &'a StatCatalog,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            modules,
            materials,
            stats,
            config,
        }
    }

    pub fn modules(&self) -> &'a ModuleRegistry {
        self.modules
    }

    pub fn materials(&self) -> &'a dyn MaterialOracle {
        self.materials
    }

    pub fn stats(&self) -> &'a StatCatalog {
        self.stats
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }
}
