//! Unified error type surfaced by the runtime.
use std::path::PathBuf;

use forge_core::{ArtifactError, ErrorSeverity, ForgeError, RebuildError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load content from {}", .dir.display())]
    Load {
        dir: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("content handle has no directory to reload from")]
    NoContentDir,

    #[error(transparent)]
    Rebuild(#[from] RebuildError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl ForgeError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Load { .. } | Self::NoContentDir => ErrorSeverity::Fatal,
            Self::Rebuild(error) => error.severity(),
            Self::Artifact(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Load { .. } => "RUNTIME_LOAD",
            Self::NoContentDir => "RUNTIME_NO_CONTENT_DIR",
            Self::Rebuild(error) => error.error_code(),
            Self::Artifact(error) => error.error_code(),
        }
    }
}
