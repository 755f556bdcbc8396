//! Behaviors that write module data during a rebuild.

use std::sync::Arc;

use forge_core::data::{DataStore, DataValue, DataView};
use forge_core::module::BehaviorModuleBuilder;
use forge_core::{Capability, DataKey};

/// Writes a fixed value into volatile data on every rebuild.
#[derive(Clone, Debug, PartialEq)]
pub struct VolatileFlag {
    pub key: DataKey,
    pub value: DataValue,
}

impl Capability for VolatileFlag {
    fn name(&self) -> &'static str {
        "volatile_flag"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        module.contribute(move |context, _| {
            context.volatile().put(self.key.clone(), self.value.clone());
            Ok(())
        })
    }
}

/// Seeds an integer in persisted data the first time the module is present.
/// Later rebuilds leave the stored value alone. The key is protected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersistentCounter {
    pub key: DataKey,
    pub start: i64,
}

impl Capability for PersistentCounter {
    fn name(&self) -> &'static str {
        "persistent_counter"
    }

    fn attach(self: Arc<Self>, module: BehaviorModuleBuilder) -> BehaviorModuleBuilder {
        let key = self.key.clone();
        module.protect(key).contribute(move |context, _| {
            if context.persistent_view().get(&self.key).is_none() {
                context.persistent().put_int(self.key.clone(), self.start);
            }
            Ok(())
        })
    }
}
