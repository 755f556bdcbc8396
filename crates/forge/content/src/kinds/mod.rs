//! Data-driven behavior kinds.
//!
//! Content files declare modules as a list of behaviors drawn from a closed
//! set of kinds. Each [`BehaviorSpec`] resolves against the stat catalog into
//! a [`Capability`] that attaches every hook and contribution it implies, so a
//! module never has to list its tokens by hand.

mod data;
mod hooks;
mod stats;

pub use data::{PersistentCounter, VolatileFlag};
pub use hooks::{Harvest, Protection, Toggle, Tooltip, Unbreakable};
pub use stats::{SetTier, StatBonus, StatMultiplier, StatPercent};

use std::sync::Arc;

use forge_core::data::DataValue;
use forge_core::hooks::DamageKind;
use forge_core::module::{LevelingValue, ModuleCondition};
use forge_core::{
    BehaviorModule, Capability, DataKey, EngineConfig, ErrorSeverity, FloatStat, ForgeError,
    ModuleId, StatCatalog, StatId, TierStat,
};

/// Errors raised while resolving a module declaration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KindError {
    #[error("module {module}: unknown stat {stat}")]
    UnknownStat { module: ModuleId, stat: StatId },

    #[error("module {module}: stat {stat} is not a {expected} stat")]
    WrongStatKind {
        module: ModuleId,
        stat: StatId,
        expected: &'static str,
    },

    #[error("module {module}: max level must be at least 1")]
    ZeroMaxLevel { module: ModuleId },
}

impl ForgeError for KindError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStat { .. } => "KIND_UNKNOWN_STAT",
            Self::WrongStatKind { .. } => "KIND_WRONG_STAT_KIND",
            Self::ZeroMaxLevel { .. } => "KIND_ZERO_MAX_LEVEL",
        }
    }
}

/// One behavior of a declared module.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorSpec {
    StatBonus {
        stat: StatId,
        value: LevelingValue,
    },
    StatPercent {
        stat: StatId,
        value: LevelingValue,
    },
    StatMultiplier {
        stat: StatId,
        value: LevelingValue,
    },
    SetTier {
        stat: StatId,
        tier: u32,
    },
    VolatileFlag {
        key: DataKey,
        value: DataValue,
    },
    PersistentCounter {
        key: DataKey,
        #[cfg_attr(feature = "serde", serde(default))]
        start: i64,
    },
    Tooltip {
        text: String,
    },
    Protection {
        #[cfg_attr(feature = "serde", serde(default))]
        kinds: Vec<DamageKind>,
        value: LevelingValue,
    },
    Toggle {
        key: DataKey,
    },
    Unbreakable,
    Harvest {
        tier: u32,
    },
}

impl BehaviorSpec {
    /// Resolves stat references and returns the capability to attach.
    pub fn resolve(
        &self,
        module: &ModuleId,
        stats: &StatCatalog,
    ) -> Result<Arc<dyn Capability>, KindError> {
        let capability: Arc<dyn Capability> = match self {
            Self::StatBonus { stat, value } => Arc::new(StatBonus {
                stat: float_stat(module, stats, stat)?,
                value: *value,
            }),
            Self::StatPercent { stat, value } => Arc::new(StatPercent {
                stat: float_stat(module, stats, stat)?,
                value: *value,
            }),
            Self::StatMultiplier { stat, value } => Arc::new(StatMultiplier {
                stat: float_stat(module, stats, stat)?,
                value: *value,
            }),
            Self::SetTier { stat, tier } => Arc::new(SetTier {
                stat: tier_stat(module, stats, stat)?,
                tier: *tier,
            }),
            Self::VolatileFlag { key, value } => Arc::new(VolatileFlag {
                key: key.clone(),
                value: value.clone(),
            }),
            Self::PersistentCounter { key, start } => Arc::new(PersistentCounter {
                key: key.clone(),
                start: *start,
            }),
            Self::Tooltip { text } => Arc::new(Tooltip { text: text.clone() }),
            Self::Protection { kinds, value } => Arc::new(Protection {
                kinds: kinds.clone(),
                value: *value,
            }),
            Self::Toggle { key } => Arc::new(Toggle { key: key.clone() }),
            Self::Unbreakable => Arc::new(Unbreakable),
            Self::Harvest { tier } => Arc::new(Harvest { tier: *tier }),
        };
        Ok(capability)
    }
}

fn float_stat(module: &ModuleId, stats: &StatCatalog, id: &StatId) -> Result<FloatStat, KindError> {
    match stats.get(id) {
        Some(stat) => stat.as_float().cloned().ok_or_else(|| KindError::WrongStatKind {
            module: module.clone(),
            stat: id.clone(),
            expected: "float",
        }),
        None => Err(KindError::UnknownStat {
            module: module.clone(),
            stat: id.clone(),
        }),
    }
}

fn tier_stat(module: &ModuleId, stats: &StatCatalog, id: &StatId) -> Result<TierStat, KindError> {
    match stats.get(id) {
        Some(stat) => stat.as_tier().cloned().ok_or_else(|| KindError::WrongStatKind {
            module: module.clone(),
            stat: id.clone(),
            expected: "tier",
        }),
        None => Err(KindError::UnknownStat {
            module: module.clone(),
            stat: id.clone(),
        }),
    }
}

/// Declarative module definition as written in content files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleSpec {
    pub id: ModuleId,
    /// Falls back to [`EngineConfig::default_priority`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_level: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: ModuleCondition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub protected: Vec<DataKey>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behaviors: Vec<BehaviorSpec>,
}

impl ModuleSpec {
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            priority: None,
            max_level: None,
            condition: ModuleCondition::Always,
            protected: Vec::new(),
            behaviors: Vec::new(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorSpec) -> Self {
        self.behaviors.push(behavior);
        self
    }

    /// Builds the shareable module. Behaviors attach in declaration order.
    pub fn build(
        &self,
        stats: &StatCatalog,
        config: &EngineConfig,
    ) -> Result<BehaviorModule, KindError> {
        let mut builder = BehaviorModule::builder(self.id.clone())
            .priority(self.priority.unwrap_or(config.default_priority))
            .condition(self.condition.clone());

        if let Some(max_level) = self.max_level {
            if max_level == 0 {
                return Err(KindError::ZeroMaxLevel {
                    module: self.id.clone(),
                });
            }
            builder = builder.max_level(max_level);
        }
        for key in &self.protected {
            builder = builder.protect(key.clone());
        }
        for behavior in &self.behaviors {
            builder = builder.with(behavior.resolve(&self.id, stats)?);
        }
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::artifact::rebuild;
    use forge_core::data::DataView;
    use forge_core::hooks::{
        CAN_HARVEST, DamageSource, HarvestTarget, PREVENT_DURABILITY_LOSS, PROTECTION, TOOLTIP,
        TooltipContext,
    };
    use forge_core::stats::key::{ARMOR, DURABILITY, HARVEST_TIER, MINING_SPEED};
    use forge_core::{
        ArtifactData, ForgeEnv, MaterialCatalog, ModuleEntry, ModuleList, ModuleRegistry,
    };

    const SHARP: ModuleId = ModuleId::from_static("forge:sharp");
    const GLOW: DataKey = DataKey::from_static("forge:glow");
    const KILLS: DataKey = DataKey::from_static("forge:kills");

    fn registry(specs: &[ModuleSpec]) -> ModuleRegistry {
        let stats = StatCatalog::builtin();
        let config = EngineConfig::default();
        specs
            .iter()
            .fold(ModuleRegistry::builder(), |builder, spec| {
                builder.register(spec.build(&stats, &config).expect("valid spec"))
            })
            .build()
            .expect("valid registry")
    }

    fn built(specs: &[ModuleSpec], level: u32) -> forge_core::artifact::Built {
        let registry = registry(specs);
        let materials = MaterialCatalog::new();
        let stats = StatCatalog::builtin();
        let config = EngineConfig::default();
        let env = ForgeEnv::new(&registry, &materials, &stats, &config);
        let data = ArtifactData::default()
            .with_upgrades(ModuleList::merged([ModuleEntry::new(SHARP, level)]));
        rebuild(&data, &env).expect("rebuild succeeds")
    }

    #[test]
    fn stat_kinds_shape_both_layers() {
        let spec = ModuleSpec::new(SHARP)
            .with_behavior(BehaviorSpec::StatBonus {
                stat: DURABILITY.id().clone(),
                value: LevelingValue::new(10.0, 5.0),
            })
            .with_behavior(BehaviorSpec::StatPercent {
                stat: DURABILITY.id().clone(),
                value: LevelingValue::per_level(0.5),
            })
            .with_behavior(BehaviorSpec::StatMultiplier {
                stat: MINING_SPEED.id().clone(),
                value: LevelingValue::new(1.0, 0.5),
            })
            .with_behavior(BehaviorSpec::SetTier {
                stat: HARVEST_TIER.id().clone(),
                tier: 3,
            });

        let built = built(&[spec], 2);
        // (10 + 2 × 5) × (1 + 2 × 0.5)
        assert_eq!(built.stats.base_value(&DURABILITY), 40.0);
        assert_eq!(built.stats.multiplier(&MINING_SPEED), 2.0);
        assert_eq!(built.stats.tier(&HARVEST_TIER), 3);
        assert_eq!(built.stats.multipliers().len(), 1);
    }

    #[test]
    fn data_kinds_write_their_stores() {
        let spec = ModuleSpec::new(SHARP)
            .with_behavior(BehaviorSpec::VolatileFlag {
                key: GLOW,
                value: DataValue::Bool(true),
            })
            .with_behavior(BehaviorSpec::PersistentCounter {
                key: KILLS,
                start: 5,
            });

        let module = spec
            .build(&StatCatalog::builtin(), &EngineConfig::default())
            .expect("valid spec");
        assert!(module.protected_keys().contains(&KILLS));
        assert_eq!(module.capabilities(), &["volatile_flag", "persistent_counter"]);

        let built = built(&[spec], 1);
        assert!(built.volatile.get_bool(&GLOW));
        assert_eq!(built.persistent.get_int(&KILLS), 5);
    }

    #[test]
    fn hook_kinds_answer_their_tokens() {
        let spec = ModuleSpec::new(SHARP)
            .with_behavior(BehaviorSpec::Tooltip {
                text: "Sharpness {level}".to_owned(),
            })
            .with_behavior(BehaviorSpec::Protection {
                kinds: vec![DamageKind::Fire],
                value: LevelingValue::per_level(1.5),
            })
            .with_behavior(BehaviorSpec::Unbreakable)
            .with_behavior(BehaviorSpec::Harvest { tier: 2 });

        let built = built(&[spec], 2);
        let view = built.view();
        assert_eq!(
            view.hook(&TOOLTIP).invoke(&TooltipContext::default()),
            vec!["Sharpness 2".to_owned()]
        );
        let fire = DamageSource {
            kind: DamageKind::Fire,
            amount: 1.0,
        };
        let fall = DamageSource {
            kind: DamageKind::Fall,
            amount: 1.0,
        };
        assert_eq!(view.hook(&PROTECTION).invoke(&fire), 3.0);
        assert_eq!(view.hook(&PROTECTION).invoke(&fall), 0.0);
        assert!(view.hook(&PREVENT_DURABILITY_LOSS).invoke(&1));
        assert!(view.hook(&CAN_HARVEST).invoke(&HarvestTarget { required_tier: 2 }));
        assert!(!view.hook(&CAN_HARVEST).invoke(&HarvestTarget { required_tier: 3 }));
    }

    #[test]
    fn unresolvable_specs_are_rejected() {
        let stats = StatCatalog::builtin();
        let config = EngineConfig::default();

        let unknown = ModuleSpec::new(SHARP).with_behavior(BehaviorSpec::StatBonus {
            stat: StatId::from_static("forge:mana"),
            value: LevelingValue::per_level(1.0),
        });
        assert!(matches!(
            unknown.build(&stats, &config),
            Err(KindError::UnknownStat { .. })
        ));

        let wrong = ModuleSpec::new(SHARP).with_behavior(BehaviorSpec::SetTier {
            stat: ARMOR.id().clone(),
            tier: 1,
        });
        let error = wrong.build(&stats, &config).expect_err("armor is a float stat");
        assert_eq!(error.error_code(), "KIND_WRONG_STAT_KIND");

        let mut zero = ModuleSpec::new(SHARP);
        zero.max_level = Some(0);
        assert!(zero.build(&stats, &config).is_err());
    }

    #[test]
    fn priority_falls_back_to_config() {
        let config = EngineConfig {
            default_priority: 7,
            ..EngineConfig::default()
        };
        let module = ModuleSpec::new(SHARP)
            .build(&StatCatalog::builtin(), &config)
            .expect("valid spec");
        assert_eq!(module.priority(), 7);
    }
}
