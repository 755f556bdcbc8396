//! Saved artifact loader.

use std::path::Path;

use forge_core::ArtifactData;

use crate::loaders::{LoadResult, read_file};

/// Reads and writes serialized artifacts as RON.
pub struct ArtifactLoader;

impl ArtifactLoader {
    pub fn load(path: &Path) -> LoadResult<ArtifactData> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ArtifactData> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse artifact RON: {}", e))
    }

    pub fn to_ron(data: &ArtifactData) -> LoadResult<String> {
        ron::ser::to_string_pretty(data, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize artifact: {}", e))
    }

    pub fn save(path: &Path, data: &ArtifactData) -> LoadResult<()> {
        let content = Self::to_ron(data)?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }
}
