//! Shared runtime state for hosts that rebuild many artifacts.
//!
//! Content (module registry, materials, stats, engine config) is loaded once
//! and published as an immutable snapshot. Any number of threads read the
//! current snapshot concurrently; a reload replaces it wholesale and drops
//! every memoized result computed against the old one.
//!
//! Modules are organized by responsibility:
//! - [`config`] reads runtime settings from the environment
//! - [`handle`] owns the current content snapshot and its generation
//! - [`cache`] memoizes material summaries per generation
//! - [`error`] is the runtime error type
pub mod cache;
pub mod config;
pub mod error;
pub mod handle;

pub use cache::{CacheStats, StatCache};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use handle::{ContentHandle, HostedArtifact, Snapshot};
