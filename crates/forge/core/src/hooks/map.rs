//! Per-artifact dispatch table.

use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::warn;

use super::merge::Merge;
use super::token::HookToken;
use crate::artifact::ArtifactView;
use crate::keys::HookId;
use crate::module::{BehaviorModule, ModuleEntry, ModuleList, ModuleRegistry};

/// Maps each hook token to the modules implementing it, in entry-list order.
///
/// Built fresh from a [`ModuleList`] on every rebuild and never mutated
/// afterwards.
#[derive(Clone, Debug, Default)]
pub struct HookMap {
    modules: Vec<(ModuleEntry, Arc<BehaviorModule>)>,
    by_token: BTreeMap<HookId, Vec<usize>>,
}

impl HookMap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolves every entry through `registry` and indexes its hooks.
    ///
    /// Entries whose module is missing from the registry are skipped.
    pub fn build(list: &ModuleList, registry: &ModuleRegistry) -> Self {
        let mut map = Self::empty();
        for entry in list {
            let Some(module) = registry.get(entry.id()) else {
                warn!(
                    target: "forge::hooks",
                    module = %entry.id(),
                    "entry has no registered module, skipping its hooks"
                );
                continue;
            };

            let index = map.modules.len();
            for id in module.hooks().ids() {
                map.by_token.entry(id.clone()).or_default().push(index);
            }
            map.modules.push((entry.clone(), Arc::clone(module)));
        }
        map
    }

    /// Implementations of `id`, in entry-list order.
    pub fn implementors(
        &self,
        id: &HookId,
    ) -> impl Iterator<Item = (&ModuleEntry, &BehaviorModule)> + '_ {
        self.by_token
            .get(id)
            .into_iter()
            .flatten()
            .map(|index| {
                let (entry, module) = &self.modules[*index];
                (entry, module.as_ref())
            })
    }

    /// Every resolved module, in entry-list order.
    pub fn modules(&self) -> impl Iterator<Item = (&ModuleEntry, &BehaviorModule)> + '_ {
        self.modules
            .iter()
            .map(|(entry, module)| (entry, module.as_ref()))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &HookId> {
        self.by_token.keys()
    }

    pub fn count(&self, id: &HookId) -> usize {
        self.by_token.get(id).map_or(0, Vec::len)
    }
}

/// Callable proxy for one token on one artifact.
pub struct HookDispatch<'a, A, M> {
    token: HookToken<A, M>,
    view: ArtifactView<'a>,
}

impl<'a, A: 'static, M: Merge> HookDispatch<'a, A, M> {
    pub(crate) fn new(token: &HookToken<A, M>, view: ArtifactView<'a>) -> Self {
        Self {
            token: token.clone(),
            view,
        }
    }

    /// True if no module implements this token.
    pub fn is_empty(&self) -> bool {
        self.view.hooks().count(self.token.id()) == 0
    }

    /// Runs every implementation in priority order and folds the results.
    ///
    /// Modules whose condition fails are skipped. A handler that returns an
    /// error is logged and skipped; dispatch continues with the next one.
    pub fn invoke(&self, args: &A) -> M::Output {
        let context = self.view.condition_context();
        let mut acc = M::start();
        for (entry, module) in self.view.hooks().implementors(self.token.id()) {
            if !module.condition().test(&context, entry) {
                continue;
            }
            for handler in module.hooks().handlers(&self.token) {
                match handler(&self.view, entry, args) {
                    Ok(item) => match M::merge(acc, item) {
                        ControlFlow::Continue(next) => acc = next,
                        ControlFlow::Break(done) => return done,
                    },
                    Err(error) => warn!(
                        target: "forge::hooks",
                        hook = %self.token.id(),
                        module = %entry.id(),
                        strategy = %M::STRATEGY,
                        error = %error,
                        "hook handler failed, skipping"
                    ),
                }
            }
        }
        acc
    }
}
