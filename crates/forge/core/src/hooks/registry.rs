use std::any::TypeId;
use std::collections::BTreeMap;

use super::builtin;
use super::error::HookError;
use super::merge::{Merge, MergeStrategy};
use super::set::HookSet;
use super::token::HookToken;
use crate::keys::HookId;

#[derive(Clone, Debug)]
struct TokenInfo {
    strategy: MergeStrategy,
    signature: TypeId,
}

/// Every hook token known to the current configuration.
///
/// Populated once at load time and read-only afterwards. Modules may only
/// attach handlers to registered tokens.
#[derive(Clone, Debug, Default)]
pub struct HookRegistry {
    tokens: BTreeMap<HookId, TokenInfo>,
}

impl HookRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the built-in tokens.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        builtin::register_all(&mut registry);
        registry
    }

    /// Registers a token. Registering the same token twice is a no-op;
    /// reusing an id with another signature is a conflict.
    pub fn register<A: 'static, M: Merge>(
        &mut self,
        token: &HookToken<A, M>,
    ) -> Result<(), HookError> {
        match self.tokens.get(token.id()) {
            Some(existing) if existing.signature != HookToken::<A, M>::signature() => {
                Err(HookError::Conflict {
                    hook: token.id().clone(),
                })
            }
            Some(_) => Ok(()),
            None => {
                self.insert(token);
                Ok(())
            }
        }
    }

    pub(super) fn insert<A: 'static, M: Merge>(&mut self, token: &HookToken<A, M>) {
        self.tokens.insert(
            token.id().clone(),
            TokenInfo {
                strategy: M::STRATEGY,
                signature: HookToken::<A, M>::signature(),
            },
        );
    }

    pub fn contains(&self, id: &HookId) -> bool {
        self.tokens.contains_key(id)
    }

    pub fn strategy(&self, id: &HookId) -> Option<MergeStrategy> {
        self.tokens.get(id).map(|info| info.strategy)
    }

    pub fn ids(&self) -> impl Iterator<Item = &HookId> {
        self.tokens.keys()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Checks that every token in `set` is registered with the same signature.
    pub fn validate(&self, set: &HookSet) -> Result<(), HookError> {
        if let Some(hook) = set.conflicts().first() {
            return Err(HookError::Conflict { hook: hook.clone() });
        }
        for (id, _, signature) in set.declarations() {
            match self.tokens.get(id) {
                None => return Err(HookError::UnknownToken { hook: id.clone() }),
                Some(info) if info.signature != signature => {
                    return Err(HookError::Conflict { hook: id.clone() });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
