//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect;
mod validate;

pub use inspect::Inspect;
pub use validate::Validate;

use std::path::PathBuf;

use forge_runtime::RuntimeConfig;

/// Explicit directory, or `FORGE_CONTENT_DIR`, or the shipped content.
fn content_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| RuntimeConfig::from_env().content_dir)
}
