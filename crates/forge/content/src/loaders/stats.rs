//! Custom stat loader.

use std::path::Path;

use forge_core::{FloatStat, StatCatalog, StatId, TierStat};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Float stat declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatStatSpec {
    pub id: StatId,
    #[serde(default)]
    pub default: f32,
    #[serde(default)]
    pub min: f32,
    pub max: f32,
}

/// Tier stat declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierStatSpec {
    pub id: StatId,
    #[serde(default)]
    pub default: u32,
}

/// Stat declaration structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatFile {
    pub floats: Vec<FloatStatSpec>,
    pub tiers: Vec<TierStatSpec>,
}

/// Loader for custom stats. The built-in stats are always present.
pub struct StatLoader;

impl StatLoader {
    pub fn load(path: &Path) -> LoadResult<StatCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StatCatalog> {
        let file: StatFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stat RON: {}", e))?;

        let mut catalog = StatCatalog::builtin();
        for spec in file.floats {
            let stat = FloatStat::custom(spec.id, spec.default, spec.min, spec.max)
                .map_err(|e| anyhow::anyhow!("Invalid float stat: {}", e))?;
            catalog
                .register(stat)
                .map_err(|e| anyhow::anyhow!("Failed to register stat: {}", e))?;
        }
        for spec in file.tiers {
            catalog
                .register(TierStat::custom(spec.id, spec.default))
                .map_err(|e| anyhow::anyhow!("Failed to register stat: {}", e))?;
        }

        Ok(catalog)
    }
}
