//! Content loaders for reading forge data from files.
//!
//! Modules, materials, stats, and saved artifacts are RON; engine
//! configuration is TOML.

pub mod artifact;
pub mod config;
pub mod factory;
pub mod material;
pub mod module;
pub mod stats;

pub use artifact::ArtifactLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use material::MaterialLoader;
pub use module::ModuleLoader;
pub use stats::StatLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
