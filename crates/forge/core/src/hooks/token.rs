use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

use super::merge::{Merge, MergeStrategy};
use crate::keys::HookId;

/// Typed identity of one extension point.
///
/// `A` is the argument passed to every handler and `M` the merge rule that
/// folds their results. Two tokens with the same id must agree on both; the
/// hook registry rejects conflicting registrations.
pub struct HookToken<A, M> {
    id: HookId,
    _signature: PhantomData<fn(&A) -> M>,
}

impl<A: 'static, M: Merge> HookToken<A, M> {
    pub const fn new(id: &'static str) -> Self {
        Self {
            id: HookId::from_static(id),
            _signature: PhantomData,
        }
    }

    /// Token for an id loaded at runtime.
    pub fn with_id(id: HookId) -> Self {
        Self {
            id,
            _signature: PhantomData,
        }
    }

    pub fn id(&self) -> &HookId {
        &self.id
    }

    pub fn strategy(&self) -> MergeStrategy {
        M::STRATEGY
    }

    pub(crate) fn signature() -> TypeId {
        TypeId::of::<(A, M)>()
    }
}

impl<A, M> Clone for HookToken<A, M> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            _signature: PhantomData,
        }
    }
}

impl<A, M> fmt::Debug for HookToken<A, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HookToken").field(&self.id).finish()
    }
}
