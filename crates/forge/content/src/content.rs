//! The loaded content bundle.

use forge_core::{
    EngineConfig, ForgeEnv, MaterialCatalog, MaterialId, ModuleId, ModuleRegistry, StatCatalog,
    StatId,
};

/// Everything a rebuild reads: modules, materials, stats, and engine config.
///
/// A bundle is immutable once loaded. Reloading content produces a new bundle.
#[derive(Debug)]
pub struct Content {
    pub registry: ModuleRegistry,
    pub materials: MaterialCatalog,
    pub stats: StatCatalog,
    pub config: EngineConfig,
}

/// Cross-reference problem found by [`Content::issues`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentIssue {
    #[error("material {material} grants unknown module {module}")]
    UnknownTrait {
        material: MaterialId,
        module: ModuleId,
    },

    #[error("material {material} contributes to unknown stat {stat}")]
    UnknownStat { material: MaterialId, stat: StatId },

    #[error("material {material} uses {stat} as a {expected} stat")]
    WrongStatKind {
        material: MaterialId,
        stat: StatId,
        expected: &'static str,
    },
}

impl Content {
    pub fn new(
        registry: ModuleRegistry,
        materials: MaterialCatalog,
        stats: StatCatalog,
        config: EngineConfig,
    ) -> Self {
        Self {
            registry,
            materials,
            stats,
            config,
        }
    }

    pub fn env(&self) -> ForgeEnv<'_> {
        ForgeEnv::new(&self.registry, &self.materials, &self.stats, &self.config)
    }

    /// Dangling references that a rebuild would skip with a warning.
    pub fn issues(&self) -> Vec<ContentIssue> {
        let mut issues = Vec::new();
        for material in self.materials.iter() {
            for contribution in &material.stats {
                match self.stats.get(&contribution.stat) {
                    None => issues.push(ContentIssue::UnknownStat {
                        material: material.id.clone(),
                        stat: contribution.stat.clone(),
                    }),
                    Some(stat) if stat.as_float().is_none() => {
                        issues.push(ContentIssue::WrongStatKind {
                            material: material.id.clone(),
                            stat: contribution.stat.clone(),
                            expected: "float",
                        })
                    }
                    Some(_) => {}
                }
            }
            for (stat, _) in &material.tiers {
                match self.stats.get(stat) {
                    None => issues.push(ContentIssue::UnknownStat {
                        material: material.id.clone(),
                        stat: stat.clone(),
                    }),
                    Some(key) if key.as_tier().is_none() => {
                        issues.push(ContentIssue::WrongStatKind {
                            material: material.id.clone(),
                            stat: stat.clone(),
                            expected: "tier",
                        })
                    }
                    Some(_) => {}
                }
            }
            for entry in &material.traits {
                if !self.registry.contains(entry.id()) {
                    issues.push(ContentIssue::UnknownTrait {
                        material: material.id.clone(),
                        module: entry.id().clone(),
                    });
                }
            }
        }
        issues
    }
}
