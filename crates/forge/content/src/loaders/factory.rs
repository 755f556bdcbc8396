//! Content factory for building a content bundle from data files.

use std::path::{Path, PathBuf};

use forge_core::{BehaviorModule, EngineConfig, MaterialDefinition, ModuleRegistry, StatCatalog};
use tracing::{debug, info};

use crate::content::Content;
use crate::loaders::{ConfigLoader, LoadResult, MaterialLoader, ModuleLoader, StatLoader};

/// Content factory that loads all forge content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml    (optional)
/// ├── stats.ron      (optional)
/// ├── modules.ron
/// └── materials.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load engine configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            debug!(target: "forge::content", path = %path.display(), "no config file, using defaults");
            return Ok(EngineConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the stat catalog from `stats.ron`, or the built-ins if absent.
    pub fn load_stats(&self) -> LoadResult<StatCatalog> {
        let path = self.data_dir.join("stats.ron");
        if !path.exists() {
            return Ok(StatCatalog::builtin());
        }
        StatLoader::load(&path)
    }

    /// Load material definitions from `materials.ron`.
    pub fn load_materials(&self) -> LoadResult<Vec<MaterialDefinition>> {
        let path = self.data_dir.join("materials.ron");
        MaterialLoader::load(&path)
    }

    /// Load and build modules from `modules.ron`.
    pub fn load_modules(
        &self,
        stats: &StatCatalog,
        config: &EngineConfig,
    ) -> LoadResult<Vec<BehaviorModule>> {
        let path = self.data_dir.join("modules.ron");
        ModuleLoader::load(&path, stats, config)
    }

    /// Loads everything and assembles a validated [`Content`] bundle.
    pub fn load(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let stats = self.load_stats()?;
        let modules = self.load_modules(&stats, &config)?;
        let materials = self.load_materials()?;

        let registry = modules
            .into_iter()
            .fold(ModuleRegistry::builder(), |builder, module| {
                builder.register(module)
            })
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build module registry: {}", e))?;

        info!(
            target: "forge::content",
            dir = %self.data_dir.display(),
            modules = registry.len(),
            materials = materials.len(),
            stats = stats.len(),
            "content loaded"
        );

        Ok(Content::new(
            registry,
            materials.into_iter().collect(),
            stats,
            config,
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
