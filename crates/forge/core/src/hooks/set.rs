//! Per-module table of hook handlers.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::error::HookError;
use super::merge::{Merge, MergeStrategy};
use super::token::HookToken;
use crate::artifact::ArtifactView;
use crate::keys::HookId;
use crate::module::ModuleEntry;

/// Handler for a token with argument `A` returning `T`.
///
/// Handlers receive the artifact view and the module's own entry, so a module
/// reads its level without a lookup.
pub type Handler<A, T> =
    Arc<dyn Fn(&ArtifactView<'_>, &ModuleEntry, &A) -> Result<T, HookError> + Send + Sync>;

struct ErasedHooks {
    strategy: MergeStrategy,
    signature: TypeId,
    handlers: Vec<Arc<dyn Any + Send + Sync>>,
}

/// The `(token, handler)` pairs one module declares.
///
/// A module may attach several handlers to the same token; they run in the
/// order they were attached.
#[derive(Default)]
pub struct HookSet {
    hooks: BTreeMap<HookId, ErasedHooks>,
    conflicts: Vec<HookId>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a handler to `token`.
    pub fn insert<A, M, F>(&mut self, token: &HookToken<A, M>, handler: F)
    where
        A: 'static,
        M: Merge,
        F: Fn(&ArtifactView<'_>, &ModuleEntry, &A) -> Result<M::Item, HookError>
            + Send
            + Sync
            + 'static,
    {
        let handler: Handler<A, M::Item> = Arc::new(handler);
        let signature = HookToken::<A, M>::signature();
        let slot = self
            .hooks
            .entry(token.id().clone())
            .or_insert_with(|| ErasedHooks {
                strategy: M::STRATEGY,
                signature,
                handlers: Vec::new(),
            });

        if slot.signature != signature {
            self.conflicts.push(token.id().clone());
            return;
        }
        slot.handlers.push(Arc::new(handler));
    }

    pub fn contains(&self, id: &HookId) -> bool {
        self.hooks.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &HookId> {
        self.hooks.keys()
    }

    /// `(id, strategy, signature)` of every attached token.
    pub fn declarations(&self) -> impl Iterator<Item = (&HookId, MergeStrategy, TypeId)> {
        self.hooks
            .iter()
            .map(|(id, hooks)| (id, hooks.strategy, hooks.signature))
    }

    /// Tokens attached twice with different signatures.
    pub fn conflicts(&self) -> &[HookId] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Handlers attached to `token`, in attachment order.
    pub fn handlers<A, M>(&self, token: &HookToken<A, M>) -> Vec<&Handler<A, M::Item>>
    where
        A: 'static,
        M: Merge,
    {
        let Some(hooks) = self.hooks.get(token.id()) else {
            return Vec::new();
        };
        if hooks.signature != HookToken::<A, M>::signature() {
            warn!(
                target: "forge::hooks",
                hook = %token.id(),
                "handler signature does not match token"
            );
            return Vec::new();
        }
        hooks
            .handlers
            .iter()
            .filter_map(|handler| handler.downcast_ref::<Handler<A, M::Item>>())
            .collect()
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.hooks
                    .iter()
                    .map(|(id, hooks)| (id, (hooks.strategy, hooks.handlers.len()))),
            )
            .finish()
    }
}
