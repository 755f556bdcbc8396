use crate::error::{ErrorSeverity, ForgeError};
use crate::keys::HookId;

/// Errors raised by hook handlers and by hook registration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// A handler reported a failure.
    #[error("{0}")]
    Failed(String),

    #[error("hook {hook} is not registered")]
    UnknownToken { hook: HookId },

    /// The same hook id was registered with two different signatures or
    /// merge strategies.
    #[error("hook {hook} is registered with a conflicting signature")]
    Conflict { hook: HookId },
}

impl HookError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

impl ForgeError for HookError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Failed(_) => ErrorSeverity::Recoverable,
            Self::UnknownToken { .. } | Self::Conflict { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Failed(_) => "HOOK_FAILED",
            Self::UnknownToken { .. } => "HOOK_UNKNOWN_TOKEN",
            Self::Conflict { .. } => "HOOK_CONFLICT",
        }
    }
}
