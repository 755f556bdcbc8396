//! Sparse multiplier layer.

use std::collections::BTreeMap;

use super::key::FloatStat;
use crate::keys::StatId;

/// Per-stat multipliers. Absent keys read as `1.0`.
///
/// Only values different from `1.0` are stored, so two layers that behave the
/// same always compare equal.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MultiplierStats {
    values: BTreeMap<StatId, f32>,
}

impl MultiplierStats {
    /// Layer with every multiplier at `1.0`.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: &FloatStat) -> f32 {
        self.values.get(stat.id()).copied().unwrap_or(1.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StatId, f32)> {
        self.values.iter().map(|(id, value)| (id, *value))
    }

    /// Starts a builder seeded with this layer.
    pub fn to_builder(&self) -> MultiplierBuilder {
        MultiplierBuilder {
            values: self.values.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MultiplierBuilder {
    values: BTreeMap<StatId, f32>,
}

impl MultiplierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a multiplier. `1.0` clears the key; negatives clamp to `0`.
    pub fn set(&mut self, stat: &FloatStat, multiplier: f32) -> &mut Self {
        if multiplier == 1.0 {
            self.values.remove(stat.id());
        } else {
            self.values.insert(stat.id().clone(), multiplier.max(0.0));
        }
        self
    }

    /// Multiplies the current value for `stat` by `factor`.
    pub fn multiply(&mut self, stat: &FloatStat, factor: f32) -> &mut Self {
        let current = self.get(stat);
        self.set(stat, current * factor)
    }

    pub fn get(&self, stat: &FloatStat) -> f32 {
        self.values.get(stat.id()).copied().unwrap_or(1.0)
    }

    pub fn build(self) -> MultiplierStats {
        MultiplierStats {
            values: self.values,
        }
    }
}
