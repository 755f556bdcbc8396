use crate::data::ModData;
use crate::keys::MaterialId;
use crate::module::ModuleList;

/// Serialized form of an artifact: the raw inputs of a rebuild.
///
/// Everything else (volatile data, hooks, stats) is derived from this and is
/// never persisted.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArtifactData {
    /// Materials in part order. Each contributes base stats and traits.
    pub materials: Vec<MaterialId>,
    /// Modules applied on top of material traits.
    pub upgrades: ModuleList,
    pub persistent: ModData,
}

impl ArtifactData {
    pub fn new(materials: Vec<MaterialId>) -> Self {
        Self {
            materials,
            ..Self::default()
        }
    }

    pub fn with_upgrades(mut self, upgrades: ModuleList) -> Self {
        self.upgrades = upgrades;
        self
    }

    pub fn with_persistent(mut self, persistent: ModData) -> Self {
        self.persistent = persistent;
        self
    }
}
