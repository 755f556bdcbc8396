use std::collections::BTreeSet;

use crate::keys::DataKey;

/// Engine-wide tunables shared by every artifact built against one content set.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Priority given to modules that do not declare one. Higher runs first.
    pub default_priority: i32,

    /// Upper bound applied on top of every module's own maximum level.
    pub max_level: u32,

    /// When false, unknown module ids abort entry-list building instead of
    /// being dropped with a warning.
    pub tolerate_unknown_modules: bool,

    /// Persisted keys that generic editors may never touch.
    pub protected_keys: BTreeSet<DataKey>,
}

impl EngineConfig {
    pub const DEFAULT_PRIORITY: i32 = 100;
    pub const DEFAULT_MAX_LEVEL: u32 = 255;

    pub fn new() -> Self {
        Self {
            default_priority: Self::DEFAULT_PRIORITY,
            max_level: Self::DEFAULT_MAX_LEVEL,
            tolerate_unknown_modules: true,
            protected_keys: BTreeSet::new(),
        }
    }

    /// Strict configuration for tooling: unknown modules are errors.
    pub fn strict() -> Self {
        Self {
            tolerate_unknown_modules: false,
            ..Self::new()
        }
    }

    pub fn with_protected_key(mut self, key: DataKey) -> Self {
        self.protected_keys.insert(key);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
