use std::collections::BTreeMap;
use std::sync::Arc;

use super::definition::BehaviorModule;
use crate::error::{ErrorSeverity, ForgeError};
use crate::hooks::{HookError, HookRegistry, HookToken, Merge};
use crate::keys::ModuleId;

/// Errors raised while assembling a [`ModuleRegistry`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("module {id} is registered twice")]
    DuplicateModule { id: ModuleId },

    #[error("module {module} declares an invalid hook: {source}")]
    InvalidHook {
        module: ModuleId,
        #[source]
        source: HookError,
    },

    #[error("hook token rejected: {0}")]
    Token(#[source] HookError),
}

impl ForgeError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateModule { .. } => "REGISTRY_DUPLICATE_MODULE",
            Self::InvalidHook { .. } => "REGISTRY_INVALID_HOOK",
            Self::Token(_) => "REGISTRY_TOKEN",
        }
    }
}

/// Process-wide, read-only table of behavior modules and hook tokens.
///
/// Built once per configuration load and shared behind an `Arc`; a reload
/// replaces the whole registry rather than editing it.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<ModuleId, Arc<BehaviorModule>>,
    hooks: HookRegistry,
}

impl ModuleRegistry {
    pub fn builder() -> ModuleRegistryBuilder {
        ModuleRegistryBuilder::new()
    }

    pub fn get(&self, id: &ModuleId) -> Option<&Arc<BehaviorModule>> {
        self.modules.get(id)
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.modules.contains_key(id)
    }

    /// Priority of `id`, if registered.
    pub fn priority(&self, id: &ModuleId) -> Option<i32> {
        self.get(id).map(|module| module.priority())
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Modules in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<BehaviorModule>> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Collects modules and custom tokens, validating both on `build`.
pub struct ModuleRegistryBuilder {
    modules: Vec<BehaviorModule>,
    hooks: HookRegistry,
    error: Option<RegistryError>,
}

impl ModuleRegistryBuilder {
    /// Starts with the built-in hook tokens registered.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            hooks: HookRegistry::builtin(),
            error: None,
        }
    }

    /// Registers a custom hook token.
    pub fn token<A: 'static, M: Merge>(mut self, token: &HookToken<A, M>) -> Self {
        if let Err(error) = self.hooks.register(token) {
            self.error.get_or_insert(RegistryError::Token(error));
        }
        self
    }

    pub fn register(mut self, module: BehaviorModule) -> Self {
        self.modules.push(module);
        self
    }

    pub fn build(self) -> Result<ModuleRegistry, RegistryError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut modules = BTreeMap::new();
        for module in self.modules {
            self.hooks
                .validate(module.hooks())
                .map_err(|source| RegistryError::InvalidHook {
                    module: module.id().clone(),
                    source,
                })?;

            let id = module.id().clone();
            if modules.insert(id.clone(), Arc::new(module)).is_some() {
                return Err(RegistryError::DuplicateModule { id });
            }
        }

        Ok(ModuleRegistry {
            modules,
            hooks: self.hooks,
        })
    }
}

impl Default for ModuleRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
