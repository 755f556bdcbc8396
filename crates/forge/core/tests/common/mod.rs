#![allow(dead_code)]

use forge_core::data::{DataPatch, DataStore, DataView};
use forge_core::hooks::{
    CAN_HARVEST, INTERACT, InteractionFlags, InteractionResult, PREVENT_DURABILITY_LOSS,
    PROTECTION, STAT_MULTIPLIER, TOOLTIP,
};
use forge_core::stats::key::{ATTACK_SPEED, DURABILITY, HARVEST_TIER};
use forge_core::stats::Bonus;
use forge_core::{
    BehaviorModule, DataKey, EngineConfig, ForgeEnv, HookError, MaterialCatalog,
    MaterialDefinition, MaterialId, ModuleEntry, ModuleId, ModuleRegistry, StatCatalog,
};

pub const REINFORCED: ModuleId = ModuleId::from_static("forge:reinforced");
pub const LIGHTWEIGHT: ModuleId = ModuleId::from_static("forge:lightweight");
pub const DURABLE: ModuleId = ModuleId::from_static("forge:durable");
pub const TOGGLEABLE: ModuleId = ModuleId::from_static("forge:toggleable");
pub const PLATED: ModuleId = ModuleId::from_static("forge:plated");
pub const FLAKY: ModuleId = ModuleId::from_static("forge:flaky");
pub const BROKEN: ModuleId = ModuleId::from_static("forge:broken");

pub const IRON: MaterialId = MaterialId::from_static("forge:iron");
pub const FEATHERWOOD: MaterialId = MaterialId::from_static("forge:featherwood");

pub const REINFORCED_BONUS: DataKey = DataKey::from_static("forge:reinforced_bonus");
pub const ACTIVE: DataKey = DataKey::from_static("forge:active");
pub const OWNER: DataKey = DataKey::from_static("forge:owner");
pub const USES: DataKey = DataKey::from_static("forge:uses");

pub struct Fixture {
    pub registry: ModuleRegistry,
    pub materials: MaterialCatalog,
    pub stats: StatCatalog,
    pub config: EngineConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_broken(false)
    }

    /// Adds a module whose contribution always fails.
    pub fn with_broken(broken: bool) -> Self {
        let mut builder = ModuleRegistry::builder()
            .register(reinforced())
            .register(lightweight())
            .register(durable())
            .register(toggleable())
            .register(plated())
            .register(flaky());
        if broken {
            builder = builder.register(
                BehaviorModule::builder(BROKEN)
                    .priority(10)
                    .contribute(|_, _| Err(HookError::failed("boom")))
                    .build(),
            );
        }

        Self {
            registry: builder.build().expect("fixture registry is valid"),
            materials: materials(),
            stats: StatCatalog::builtin(),
            config: EngineConfig::default().with_protected_key(OWNER),
        }
    }

    pub fn env(&self) -> ForgeEnv<'_> {
        ForgeEnv::new(&self.registry, &self.materials, &self.stats, &self.config)
    }
}

fn materials() -> MaterialCatalog {
    [
        MaterialDefinition::new(IRON)
            .with_stat(DURABILITY.id().clone(), Bonus::Flat(100.0))
            .with_tier(HARVEST_TIER.id().clone(), 2),
        MaterialDefinition::new(FEATHERWOOD)
            .with_stat(DURABILITY.id().clone(), Bonus::Flat(20.0))
            .with_trait(ModuleEntry::new(LIGHTWEIGHT, 1)),
    ]
    .into_iter()
    .collect()
}

/// +50 durability per level; records its level in volatile data.
fn reinforced() -> BehaviorModule {
    BehaviorModule::builder(REINFORCED)
        .priority(100)
        .max_level(5)
        .contribute(|context, entry| {
            context.stats().add_flat(&DURABILITY, 50.0 * entry.level() as f32);
            context
                .volatile()
                .put_int(REINFORCED_BONUS, i64::from(entry.level()));
            Ok(())
        })
        .build()
}

/// +10% attack speed per level in the multiplier layer.
fn lightweight() -> BehaviorModule {
    BehaviorModule::builder(LIGHTWEIGHT)
        .priority(50)
        .on(&STAT_MULTIPLIER, |_, entry, stat| {
            if stat.id() == ATTACK_SPEED.id() {
                Ok(1.0 + 0.1 * entry.level() as f32)
            } else {
                Ok(1.0)
            }
        })
        .on(&TOOLTIP, |_, entry, _| {
            Ok(vec![format!("Lightweight {}", entry.level())])
        })
        .build()
}

/// ×1.5 durability; ignores durability loss from level 2; harvests up to the
/// artifact's tier.
fn durable() -> BehaviorModule {
    BehaviorModule::builder(DURABLE)
        .priority(75)
        .on(&STAT_MULTIPLIER, |_, _, stat| {
            Ok(if stat.id() == DURABILITY.id() { 1.5 } else { 1.0 })
        })
        .on(&PREVENT_DURABILITY_LOSS, |_, entry, _| Ok(entry.level() >= 2))
        .on(&CAN_HARVEST, |view, _, target| {
            Ok(target.required_tier <= view.stats().tier(&HARVEST_TIER))
        })
        .build()
}

/// Sneak-interact flips a persisted flag; counts uses in persisted data.
fn toggleable() -> BehaviorModule {
    BehaviorModule::builder(TOGGLEABLE)
        .priority(60)
        .protect(USES)
        .on(&INTERACT, |view, _, interaction| {
            if !interaction.flags.contains(InteractionFlags::SNEAKING) {
                return Ok(InteractionResult::Pass);
            }
            let data = view.persistent_data();
            Ok(InteractionResult::Success(
                DataPatch::new()
                    .put(ACTIVE, !data.get_bool(&ACTIVE))
                    .put(USES, data.get_int(&USES) + 1),
            ))
        })
        .on(&TOOLTIP, |view, _, _| {
            let state = if view.persistent_data().get_bool(&ACTIVE) {
                "on"
            } else {
                "off"
            };
            Ok(vec![format!("Toggle: {state}")])
        })
        .build()
}

/// 2 protection per level, only while the toggle flag is set.
fn plated() -> BehaviorModule {
    BehaviorModule::builder(PLATED)
        .priority(40)
        .condition(forge_core::module::ModuleCondition::PersistentFlag(ACTIVE))
        .on(&PROTECTION, |_, entry, _| Ok(2.0 * entry.level() as f32))
        .build()
}

/// Every handler fails; contributes nothing.
fn flaky() -> BehaviorModule {
    BehaviorModule::builder(FLAKY)
        .priority(200)
        .on(&TOOLTIP, |_, _, _| Err(HookError::failed("tooltip exploded")))
        .on(&PROTECTION, |_, _, _| Err(HookError::failed("no armor today")))
        .on(&INTERACT, |_, _, _| Err(HookError::failed("stuck")))
        .on(&PREVENT_DURABILITY_LOSS, |_, _, _| Err(HookError::failed("cracked")))
        .on(&CAN_HARVEST, |_, _, _| Err(HookError::failed("blunt")))
        .build()
}
