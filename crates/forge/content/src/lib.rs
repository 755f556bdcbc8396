//! Data-driven content definitions and loaders.
//!
//! This crate turns content files into the shared configuration a rebuild
//! reads:
//! - Module declarations built from a closed set of behavior kinds (RON)
//! - Material catalogs with base stats and granted traits (RON)
//! - Custom stat keys beyond the built-ins (RON)
//! - Engine configuration (TOML)
//!
//! Loaded content is bundled in a [`Content`] and never appears in artifact
//! data.

mod content;
pub mod kinds;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use content::{Content, ContentIssue};
pub use kinds::{BehaviorSpec, KindError, ModuleSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    ArtifactLoader, ConfigLoader, ContentFactory, MaterialLoader, ModuleLoader, StatLoader,
};
