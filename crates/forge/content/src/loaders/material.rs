//! Material catalog loader.

use std::path::Path;

use forge_core::MaterialDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Material catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialFile {
    pub materials: Vec<MaterialDefinition>,
}

/// Loader for material catalogs from RON files.
pub struct MaterialLoader;

impl MaterialLoader {
    /// Load material definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<MaterialDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MaterialDefinition>> {
        let file: MaterialFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse material catalog RON: {}", e))?;

        Ok(file.materials)
    }
}
