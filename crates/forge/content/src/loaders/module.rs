//! Module declaration loader.

use std::path::Path;

use forge_core::{BehaviorModule, EngineConfig, StatCatalog};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::kinds::ModuleSpec;
use crate::loaders::{LoadResult, read_file};

/// Module declaration structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleFile {
    pub modules: Vec<ModuleSpec>,
}

/// Loader for module declarations from RON files.
pub struct ModuleLoader;

impl ModuleLoader {
    /// Load and build modules from a RON file.
    ///
    /// A file that does not parse is an error. A declaration that parses but
    /// does not resolve (unknown stat, zero max level) is dropped with a
    /// warning so that one bad module does not take the rest down.
    pub fn load(
        path: &Path,
        stats: &StatCatalog,
        config: &EngineConfig,
    ) -> LoadResult<Vec<BehaviorModule>> {
        let content = read_file(path)?;
        Self::parse(&content, stats, config)
    }

    pub fn parse(
        content: &str,
        stats: &StatCatalog,
        config: &EngineConfig,
    ) -> LoadResult<Vec<BehaviorModule>> {
        let file: ModuleFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse module RON: {}", e))?;

        let modules = file
            .modules
            .iter()
            .filter_map(|spec| match spec.build(stats, config) {
                Ok(module) => Some(module),
                Err(error) => {
                    warn!(
                        target: "forge::content",
                        module = %spec.id,
                        %error,
                        "dropping malformed module"
                    );
                    None
                }
            })
            .collect();

        Ok(modules)
    }
}
