use super::bonus::BaseStats;
use super::key::{FloatStat, TierStat};
use super::multiplier::MultiplierStats;

/// Immutable two-layer stat container produced by a rebuild.
///
/// Effective values are computed on read as `base × multiplier` and are never
/// cached; a new snapshot replaces the old one on every rebuild.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    base: BaseStats,
    multipliers: MultiplierStats,
}

impl StatsSnapshot {
    pub fn new(base: BaseStats, multipliers: MultiplierStats) -> Self {
        Self { base, multipliers }
    }

    /// Snapshot without multipliers, used while the multiplier layer is computed.
    pub fn base_only(base: BaseStats) -> Self {
        Self::new(base, MultiplierStats::identity())
    }

    pub fn base(&self) -> &BaseStats {
        &self.base
    }

    pub fn multipliers(&self) -> &MultiplierStats {
        &self.multipliers
    }

    pub fn base_value(&self, stat: &FloatStat) -> f32 {
        self.base.float(stat)
    }

    pub fn multiplier(&self, stat: &FloatStat) -> f32 {
        self.multipliers.get(stat)
    }

    /// `base × multiplier`.
    pub fn get(&self, stat: &FloatStat) -> f32 {
        self.base_value(stat) * self.multiplier(stat)
    }

    pub fn tier(&self, stat: &TierStat) -> u32 {
        self.base.tier(stat)
    }
}
