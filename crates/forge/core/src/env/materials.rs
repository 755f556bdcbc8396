use std::collections::BTreeMap;

use crate::keys::{MaterialId, StatId};
use crate::module::ModuleEntry;
use crate::stats::Bonus;

/// One base-stat contribution from a material.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatContribution {
    pub stat: StatId,
    pub bonus: Bonus,
}

/// Static description of a material: base stats and granted modules (traits).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialDefinition {
    pub id: MaterialId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: Vec<StatContribution>,
    /// Tier contributions, merged by maximum.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tiers: Vec<(StatId, u32)>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: Vec<ModuleEntry>,
}

impl MaterialDefinition {
    pub fn new(id: MaterialId) -> Self {
        Self {
            id,
            stats: Vec::new(),
            tiers: Vec::new(),
            traits: Vec::new(),
        }
    }

    pub fn with_stat(mut self, stat: StatId, bonus: Bonus) -> Self {
        self.stats.push(StatContribution { stat, bonus });
        self
    }

    pub fn with_tier(mut self, stat: StatId, tier: u32) -> Self {
        self.tiers.push((stat, tier));
        self
    }

    pub fn with_trait(mut self, entry: ModuleEntry) -> Self {
        self.traits.push(entry);
        self
    }
}

/// Read-only lookup of material definitions.
pub trait MaterialOracle: Send + Sync {
    fn material(&self, id: &MaterialId) -> Option<&MaterialDefinition>;
}

/// Map-backed [`MaterialOracle`].
#[derive(Clone, Debug, Default)]
pub struct MaterialCatalog {
    materials: BTreeMap<MaterialId, MaterialDefinition>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a material, returning the one it replaced.
    pub fn insert(&mut self, material: MaterialDefinition) -> Option<MaterialDefinition> {
        self.materials.insert(material.id.clone(), material)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialDefinition> {
        self.materials.values()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialOracle for MaterialCatalog {
    fn material(&self, id: &MaterialId) -> Option<&MaterialDefinition> {
        self.materials.get(id)
    }
}

impl FromIterator<MaterialDefinition> for MaterialCatalog {
    fn from_iter<T: IntoIterator<Item = MaterialDefinition>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for material in iter {
            catalog.insert(material);
        }
        catalog
    }
}
