//! Built-in hook tokens and their argument types.

use bitflags::bitflags;

use super::merge::{AnyTrue, CollectAll, FirstAccepted, Product, Sum};
use super::registry::HookRegistry;
use super::token::HookToken;
use crate::data::DataPatch;
use crate::stats::FloatStat;

/// Multiplier for one float stat. Dispatched once per stat while the
/// multiplier layer is computed.
pub const STAT_MULTIPLIER: HookToken<FloatStat, Product> =
    HookToken::new("forge:stat_multiplier");

/// Tooltip lines, gathered from every module.
pub const TOOLTIP: HookToken<TooltipContext, CollectAll<String>> = HookToken::new("forge:tooltip");

/// Player interaction. The first module that does not pass handles it.
pub const INTERACT: HookToken<Interaction, FirstAccepted<InteractionResult>> =
    HookToken::new("forge:interact");

/// Damage protection points, summed.
pub const PROTECTION: HookToken<DamageSource, Sum> = HookToken::new("forge:protection");

/// Whether a pending durability loss (the argument) is cancelled.
pub const PREVENT_DURABILITY_LOSS: HookToken<u32, AnyTrue> =
    HookToken::new("forge:prevent_durability_loss");

/// Whether the artifact can harvest a target.
pub const CAN_HARVEST: HookToken<HarvestTarget, AnyTrue> = HookToken::new("forge:can_harvest");

pub(super) fn register_all(registry: &mut HookRegistry) {
    registry.insert(&STAT_MULTIPLIER);
    registry.insert(&TOOLTIP);
    registry.insert(&INTERACT);
    registry.insert(&PROTECTION);
    registry.insert(&PREVENT_DURABILITY_LOSS);
    registry.insert(&CAN_HARVEST);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TooltipContext {
    /// Extended tooltips show numeric detail.
    pub advanced: bool,
}

bitflags! {
    /// Modifiers of a player interaction.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InteractionFlags: u8 {
        const SNEAKING = 1 << 0;
        const OFFHAND  = 1 << 1;
        const ON_BLOCK = 1 << 2;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interaction {
    pub flags: InteractionFlags,
}

impl Interaction {
    pub fn new(flags: InteractionFlags) -> Self {
        Self { flags }
    }
}

/// Outcome of an interaction handler.
///
/// Handlers only see read-only data, so a successful interaction returns the
/// persisted-data edits it wants applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionResult {
    #[default]
    Pass,
    Success(DataPatch),
    Fail,
}

impl InteractionResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum DamageKind {
    #[default]
    Generic,
    Fire,
    Fall,
    Explosion,
    Projectile,
    Magic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageSource {
    pub kind: DamageKind,
    pub amount: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarvestTarget {
    pub required_tier: u32,
}
