//! Behaviors that answer built-in hooks.

use std::sync::Arc;

use forge_core::data::{DataPatch, DataView};
use forge_core::hooks::{
    CAN_HARVEST, DamageKind, INTERACT, InteractionFlags, InteractionResult,
    PREVENT_DURABILITY_LOSS, PROTECTION, TOOLTIP,
};
use forge_core::module::{BehaviorModuleBuilder, LevelingValue};
use forge_core::{Capability, DataKey};

/// Tooltip line. `{level}` in the text is replaced by the entry's level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tooltip {
    pub text: String,
}

impl Tooltip {
    fn render(&self, level: u32) -> String {
        self.text.replace("{level}", &level.to_string())
    }
}

impl Capability for Tooltip {
    fn name(&self) -> &'static str {
        "tooltip"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.on(&TOOLTIP, move |_, entry, _| Ok(vec![self.render(entry.level())]))
    }
}

/// Protection points against some damage kinds (all kinds when empty).
#[derive(Clone, Debug, PartialEq)]
pub struct Protection {
    pub kinds: Vec<DamageKind>,
    pub value: LevelingValue,
}

impl Capability for Protection {
    fn name(&self) -> &'static str {
        "protection"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.on(&PROTECTION, move |_, entry, source| {
            if self.kinds.is_empty() || self.kinds.contains(&source.kind) {
                Ok(self.value.compute_for(entry))
            } else {
                Ok(0.0)
            }
        })
    }
}

/// Sneak-interaction flips a persisted boolean. The key is protected and
/// shown in the tooltip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toggle {
    pub key: DataKey,
}

impl Capability for Toggle {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        let tooltip = Arc::clone(&self);
        module
            .protect(self.key.clone())
            .on(&INTERACT, move |view, _, interaction| {
                if !interaction.flags.contains(InteractionFlags::SNEAKING) {
                    return Ok(InteractionResult::Pass);
                }
                let active = view.persistent_data().get_bool(&self.key);
                Ok(InteractionResult::Success(
                    DataPatch::new().put(self.key.clone(), !active),
                ))
            })
            .on(&TOOLTIP, move |view, _, _| {
                let state = if view.persistent_data().get_bool(&tooltip.key) {
                    "on"
                } else {
                    "off"
                };
                Ok(vec![format!("{}: {state}", tooltip.key.identifier().path())])
            })
    }
}

/// Cancels every durability loss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unbreakable;

impl Capability for Unbreakable {
    fn name(&self) -> &'static str {
        "unbreakable"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.on(&PREVENT_DURABILITY_LOSS, |_, _, _| Ok(true))
    }
}

/// Allows harvesting targets up to `tier`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Harvest {
    pub tier: u32,
}

impl Capability for Harvest {
    fn name(&self) -> &'static str {
        "harvest"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.on(&CAN_HARVEST, move |_, _, target| {
            Ok(target.required_tier <= self.tier)
        })
    }
}
