//! Hook tokens, per-module handler sets, and per-artifact dispatch.
//!
//! A [`HookToken`] names one extension point and fixes, at the type level,
//! the argument its handlers receive and the [`Merge`] rule that folds their
//! results. Modules attach closures to tokens when they are constructed
//! ([`HookSet`]); the [`HookRegistry`] checks that every attached token is
//! known and used with one signature. On each rebuild a [`HookMap`] indexes
//! the artifact's modules by token, preserving entry-list order, and
//! [`HookDispatch`] folds the handlers in that order.

pub mod builtin;
mod error;
mod map;
mod merge;
mod registry;
mod set;
mod token;

pub use builtin::{
    CAN_HARVEST, DamageKind, DamageSource, HarvestTarget, INTERACT, Interaction,
    InteractionFlags, InteractionResult, PREVENT_DURABILITY_LOSS, PROTECTION, STAT_MULTIPLIER,
    TOOLTIP, TooltipContext,
};
pub use error::HookError;
pub use map::{HookDispatch, HookMap};
pub use merge::{AnyTrue, CollectAll, FirstAccepted, Merge, MergeStrategy, Product, Sum, fold};
pub use registry::HookRegistry;
pub use set::{Handler, HookSet};
pub use token::HookToken;
