//! Stat keys and the built-in stat set.

use crate::keys::StatId;

/// Numeric stat: additive base layer plus a multiplier layer.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatStat {
    id: StatId,
    default: f32,
    min: f32,
    max: f32,
}

impl FloatStat {
    /// Declares a built-in stat. Bounds must satisfy `min <= default <= max`.
    pub const fn new(id: &'static str, default: f32, min: f32, max: f32) -> Self {
        Self {
            id: StatId::from_static(id),
            default,
            min,
            max,
        }
    }

    /// Declares a stat loaded from content, validating its bounds.
    pub fn custom(id: StatId, default: f32, min: f32, max: f32) -> Result<Self, StatKeyError> {
        if !(min <= default && default <= max) {
            return Err(StatKeyError::InvalidBounds {
                stat: id,
                min,
                default,
                max,
            });
        }
        Ok(Self {
            id,
            default,
            min,
            max,
        })
    }

    pub fn id(&self) -> &StatId {
        &self.id
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamps a value into this stat's bounds. NaN collapses to the minimum.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// Tier stat: the highest contribution wins. Tiers have no multiplier layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierStat {
    id: StatId,
    default: u32,
}

impl TierStat {
    pub const fn new(id: &'static str, default: u32) -> Self {
        Self {
            id: StatId::from_static(id),
            default,
        }
    }

    pub fn custom(id: StatId, default: u32) -> Self {
        Self { id, default }
    }

    pub fn id(&self) -> &StatId {
        &self.id
    }

    pub fn default_value(&self) -> u32 {
        self.default
    }
}

/// Any stat key.
#[derive(Clone, Debug, PartialEq)]
pub enum StatKey {
    Float(FloatStat),
    Tier(TierStat),
}

impl StatKey {
    pub fn id(&self) -> &StatId {
        match self {
            Self::Float(stat) => stat.id(),
            Self::Tier(stat) => stat.id(),
        }
    }

    pub fn as_float(&self) -> Option<&FloatStat> {
        match self {
            Self::Float(stat) => Some(stat),
            Self::Tier(_) => None,
        }
    }

    pub fn as_tier(&self) -> Option<&TierStat> {
        match self {
            Self::Tier(stat) => Some(stat),
            Self::Float(_) => None,
        }
    }
}

impl From<FloatStat> for StatKey {
    fn from(stat: FloatStat) -> Self {
        Self::Float(stat)
    }
}

impl From<TierStat> for StatKey {
    fn from(stat: TierStat) -> Self {
        Self::Tier(stat)
    }
}

/// Errors raised while declaring stats.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StatKeyError {
    #[error("stat {stat} has invalid bounds: min {min}, default {default}, max {max}")]
    InvalidBounds {
        stat: StatId,
        min: f32,
        default: f32,
        max: f32,
    },

    #[error("stat {0} is already registered")]
    Duplicate(StatId),
}

pub const DURABILITY: FloatStat = FloatStat::new("forge:durability", 0.0, 0.0, 1.0e9);
pub const ATTACK_DAMAGE: FloatStat = FloatStat::new("forge:attack_damage", 0.0, 0.0, 2048.0);
pub const ATTACK_SPEED: FloatStat = FloatStat::new("forge:attack_speed", 1.0, 0.0, 1024.0);
pub const MINING_SPEED: FloatStat = FloatStat::new("forge:mining_speed", 1.0, 0.1, 2048.0);
pub const ARMOR: FloatStat = FloatStat::new("forge:armor", 0.0, 0.0, 30.0);
pub const ARMOR_TOUGHNESS: FloatStat = FloatStat::new("forge:armor_toughness", 0.0, 0.0, 20.0);
pub const KNOCKBACK_RESISTANCE: FloatStat =
    FloatStat::new("forge:knockback_resistance", 0.0, 0.0, 1.0);
pub const HARVEST_TIER: TierStat = TierStat::new("forge:harvest_tier", 0);

/// Every built-in stat.
pub fn builtin() -> Vec<StatKey> {
    vec![
        DURABILITY.into(),
        ATTACK_DAMAGE.into(),
        ATTACK_SPEED.into(),
        MINING_SPEED.into(),
        ARMOR.into(),
        ARMOR_TOUGHNESS.into(),
        KNOCKBACK_RESISTANCE.into(),
        HARVEST_TIER.into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_stat_validates_bounds() {
        let id = StatId::parse("reach").unwrap();
        assert!(FloatStat::custom(id.clone(), 3.0, 0.0, 10.0).is_ok());
        assert!(matches!(
            FloatStat::custom(id, 11.0, 0.0, 10.0),
            Err(StatKeyError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn clamp_handles_nan() {
        assert_eq!(ARMOR.clamp(f32::NAN), 0.0);
        assert_eq!(ARMOR.clamp(45.0), 30.0);
        assert_eq!(ARMOR.clamp(-1.0), 0.0);
    }
}
