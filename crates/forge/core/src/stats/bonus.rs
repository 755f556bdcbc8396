//! Additive base-stat accumulation.
//!
//! Contributions for one stat are applied in a fixed order:
//! Flat → Percent → Multiply → Clamp.
//!
//! Materials contribute first, then modules in entry-list order. The order of
//! contributions within one category never changes the result except through
//! float rounding, and that order is itself deterministic.

use std::collections::BTreeMap;

use super::catalog::StatCatalog;
use super::key::{FloatStat, TierStat};
use crate::keys::StatId;

/// A single contribution to a float stat's base value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    /// Added to the stat default before any scaling.
    Flat(f32),

    /// Fractional increase, summed with other percents (0.2 = +20%).
    Percent(f32),

    /// Applied sequentially after percents (1.5 = ×1.5).
    Multiply(f32),
}

impl Bonus {
    /// Scales the bonus by a level count. Multipliers compound per level.
    pub fn scaled(self, levels: f32) -> Self {
        match self {
            Self::Flat(value) => Self::Flat(value * levels),
            Self::Percent(value) => Self::Percent(value * levels),
            Self::Multiply(value) => Self::Multiply(value.powf(levels)),
        }
    }
}

/// Ordered collection of bonuses for one stat.
///
/// ```
/// # use forge_core::stats::{Bonus, BonusStack};
/// let mut stack = BonusStack::new();
/// stack.add(Bonus::Flat(5.0));
/// stack.add(Bonus::Percent(0.2));
/// stack.add(Bonus::Percent(0.3));
/// stack.add(Bonus::Multiply(2.0));
///
/// // (10 + 5) × 1.5 × 2
/// assert_eq!(stack.apply(10.0, 0.0, 100.0), 45.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    pub fn extend(&mut self, bonuses: impl IntoIterator<Item = Bonus>) {
        self.bonuses.extend(bonuses);
    }

    /// Applies every bonus to `base` and clamps the result.
    ///
    /// ```text
    /// result = clamp((base + Σflat) × (1 + Σpercent) × Πmultiply, min, max)
    /// ```
    pub fn apply(&self, base: f32, min: f32, max: f32) -> f32 {
        let mut flat = 0.0;
        let mut percent = 0.0;
        for bonus in &self.bonuses {
            match bonus {
                Bonus::Flat(value) => flat += value,
                Bonus::Percent(value) => percent += value,
                Bonus::Multiply(_) => {}
            }
        }

        let scaled = (base + flat) * (1.0 + percent);
        let result = self
            .bonuses
            .iter()
            .filter_map(|bonus| match bonus {
                Bonus::Multiply(value) => Some(*value),
                _ => None,
            })
            .fold(scaled, |acc, value| acc * value);

        if result.is_nan() {
            return min;
        }
        result.clamp(min, max)
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }
}

/// Finalized additive layer: one value per stat that received a contribution.
///
/// Stats never contributed to read as their declared default.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    floats: BTreeMap<StatId, f32>,
    tiers: BTreeMap<StatId, u32>,
}

impl BaseStats {
    pub fn float(&self, stat: &FloatStat) -> f32 {
        self.floats
            .get(stat.id())
            .copied()
            .unwrap_or_else(|| stat.default_value())
    }

    pub fn tier(&self, stat: &TierStat) -> u32 {
        self.tiers
            .get(stat.id())
            .copied()
            .unwrap_or_else(|| stat.default_value())
    }

    pub fn floats(&self) -> impl Iterator<Item = (&StatId, f32)> {
        self.floats.iter().map(|(id, value)| (id, *value))
    }

    pub fn tiers(&self) -> impl Iterator<Item = (&StatId, u32)> {
        self.tiers.iter().map(|(id, value)| (id, *value))
    }
}

/// Accumulates base-stat contributions during the contribution phase.
#[derive(Clone, Debug, Default)]
pub struct StatsBuilder {
    floats: BTreeMap<StatId, (FloatStat, BonusStack)>,
    tiers: BTreeMap<StatId, (TierStat, u32)>,
}

impl StatsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a bonus for a float stat.
    pub fn add(&mut self, stat: &FloatStat, bonus: Bonus) -> &mut Self {
        self.floats
            .entry(stat.id().clone())
            .or_insert_with(|| (stat.clone(), BonusStack::new()))
            .1
            .add(bonus);
        self
    }

    /// Shorthand for a flat bonus.
    pub fn add_flat(&mut self, stat: &FloatStat, value: f32) -> &mut Self {
        self.add(stat, Bonus::Flat(value))
    }

    /// Raises a tier stat to at least `tier`.
    pub fn raise_tier(&mut self, stat: &TierStat, tier: u32) -> &mut Self {
        let slot = self
            .tiers
            .entry(stat.id().clone())
            .or_insert_with(|| (stat.clone(), stat.default_value()));
        slot.1 = slot.1.max(tier);
        self
    }

    /// Current tier value, including contributions made so far.
    pub fn tier(&self, stat: &TierStat) -> u32 {
        self.tiers
            .get(stat.id())
            .map_or_else(|| stat.default_value(), |(_, tier)| *tier)
    }

    /// Collapses every stack. Stats declared in `catalog` that nobody touched
    /// are left implicit and read back as their defaults.
    pub fn build(&self, catalog: &StatCatalog) -> BaseStats {
        let floats = self
            .floats
            .iter()
            .map(|(id, (stat, stack))| {
                let stat = catalog.float(id).unwrap_or(stat);
                (
                    id.clone(),
                    stack.apply(stat.default_value(), stat.min(), stat.max()),
                )
            })
            .collect();
        let tiers = self
            .tiers
            .iter()
            .map(|(id, (_, tier))| (id.clone(), *tier))
            .collect();
        BaseStats { floats, tiers }
    }
}
