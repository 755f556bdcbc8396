use super::entry::ModuleEntry;

/// Linear value scaled by a module's level: `flat + each_level × level`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelingValue {
    pub flat: f32,
    pub each_level: f32,
}

impl LevelingValue {
    pub const fn new(flat: f32, each_level: f32) -> Self {
        Self { flat, each_level }
    }

    /// Scales only with level.
    pub const fn per_level(each_level: f32) -> Self {
        Self::new(0.0, each_level)
    }

    pub fn compute(&self, level: f32) -> f32 {
        self.flat + self.each_level * level
    }

    /// Computes against the entry's effective level, so partial progress on
    /// incremental entries counts fractionally.
    pub fn compute_for(&self, entry: &ModuleEntry) -> f32 {
        self.compute(entry.effective_level())
    }
}
