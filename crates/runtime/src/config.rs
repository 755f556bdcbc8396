//! Runtime settings.
use std::env;
use std::path::PathBuf;

/// Runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory read by the content factory.
    pub content_dir: PathBuf,
    /// Memoize material summaries between rebuilds.
    pub cache: bool,
}

impl RuntimeConfig {
    pub const DEFAULT_CONTENT_DIR: &'static str = "crates/forge/content/data";

    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            ..Self::default()
        }
    }

    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FORGE_CONTENT_DIR` - Content directory (default: `crates/forge/content/data`)
    /// - `FORGE_CACHE` - `true`/`false`, memoize material summaries (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("FORGE_CONTENT_DIR") {
            config.content_dir = dir;
        }
        if let Some(cache) = read_env::<bool>("FORGE_CACHE") {
            config.cache = cache;
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(Self::DEFAULT_CONTENT_DIR),
            cache: true,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
