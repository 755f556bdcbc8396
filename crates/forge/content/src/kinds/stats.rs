//! Stat-shaping behaviors.

use std::sync::Arc;

use forge_core::hooks::STAT_MULTIPLIER;
use forge_core::module::{BehaviorModuleBuilder, LevelingValue};
use forge_core::stats::Bonus;
use forge_core::{Capability, FloatStat, TierStat};

/// Additive base-stat contribution, scaled by level.
#[derive(Clone, Debug, PartialEq)]
pub struct StatBonus {
    pub stat: FloatStat,
    pub value: LevelingValue,
}

impl Capability for StatBonus {
    fn name(&self) -> &'static str {
        "stat_bonus"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.contribute(move |context, entry| {
            context
                .stats()
                .add(&self.stat, Bonus::Flat(self.value.compute_for(entry)));
            Ok(())
        })
    }
}

/// Percentage base-stat contribution. `0.1` is +10%.
#[derive(Clone, Debug, PartialEq)]
pub struct StatPercent {
    pub stat: FloatStat,
    pub value: LevelingValue,
}

impl Capability for StatPercent {
    fn name(&self) -> &'static str {
        "stat_percent"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.contribute(move |context, entry| {
            context
                .stats()
                .add(&self.stat, Bonus::Percent(self.value.compute_for(entry)));
            Ok(())
        })
    }
}

/// Entry in the multiplier layer. Answers `1.0` for every other stat.
#[derive(Clone, Debug, PartialEq)]
pub struct StatMultiplier {
    pub stat: FloatStat,
    pub value: LevelingValue,
}

impl Capability for StatMultiplier {
    fn name(&self) -> &'static str {
        "stat_multiplier"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.on(&STAT_MULTIPLIER, move |_, entry, stat| {
            if stat.id() == self.stat.id() {
                Ok(self.value.compute_for(entry))
            } else {
                Ok(1.0)
            }
        })
    }
}

/// Raises a tier stat to at least `tier`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetTier {
    pub stat: TierStat,
    pub tier: u32,
}

impl Capability for SetTier {
    fn name(&self) -> &'static str {
        "set_tier"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.contribute(move |context, _| {
            context.stats().raise_tier(&self.stat, self.tier);
            Ok(())
        })
    }
}
