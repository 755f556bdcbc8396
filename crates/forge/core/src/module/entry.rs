//! Module entries and their leveling arithmetic.

use crate::error::{ErrorSeverity, ForgeError};
use crate::keys::ModuleId;

/// Errors raised by entry and entry-list operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("level delta for {id} must be positive, got {delta}")]
    NonPositiveDelta { id: ModuleId, delta: i32 },

    #[error("entry for {id} has level 0")]
    ZeroLevel { id: ModuleId },

    #[error("duplicate entry for {id}")]
    Duplicate { id: ModuleId },

    #[error("unknown module {id}")]
    UnknownModule { id: ModuleId },
}

impl ForgeError for EntryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownModule { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveDelta { .. } => "ENTRY_NON_POSITIVE_DELTA",
            Self::ZeroLevel { .. } => "ENTRY_ZERO_LEVEL",
            Self::Duplicate { .. } => "ENTRY_DUPLICATE",
            Self::UnknownModule { .. } => "ENTRY_UNKNOWN_MODULE",
        }
    }
}

/// Fractional progress toward the next level of an incremental entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    pub amount: u32,
    pub needed: u32,
}

/// `(module id, level)`, optionally carrying incremental progress.
///
/// For an incremental entry with a partial level, `level` counts that partial
/// level: 2 complete levels plus 3/10 progress is stored as level 3 with
/// `amount = 3, needed = 10`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StoredEntry"))]
pub struct ModuleEntry {
    id: ModuleId,
    level: u32,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    progress: Option<Progress>,
}

impl ModuleEntry {
    pub fn new(id: ModuleId, level: u32) -> Self {
        Self {
            id,
            level,
            progress: None,
        }
    }

    /// Builds an incremental entry from completed levels plus raw progress,
    /// promoting as many levels as the progress covers.
    pub fn incremental(id: ModuleId, completed: u32, amount: u32, needed: u32) -> Self {
        let mut entry = Self::new(id, 0);
        entry.set_progress(completed, amount, needed);
        entry
    }

    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// True if the last level is only partially reached.
    pub fn is_partial(&self) -> bool {
        self.progress.is_some_and(|progress| progress.amount > 0)
    }

    /// Levels reached in full.
    pub fn completed_levels(&self) -> u32 {
        if self.is_partial() {
            self.level.saturating_sub(1)
        } else {
            self.level
        }
    }

    /// Level as a float, counting partial progress fractionally.
    pub fn effective_level(&self) -> f32 {
        match self.progress {
            Some(Progress { amount, needed }) if amount > 0 && needed > 0 => {
                self.completed_levels() as f32 + amount as f32 / needed as f32
            }
            _ => self.level as f32,
        }
    }

    /// Copy of this entry with a new level. Progress is discarded.
    pub fn with_level(&self, level: u32) -> Self {
        Self::new(self.id.clone(), level)
    }

    /// Adds progress toward the next level.
    ///
    /// Progress past `needed` promotes repeatedly, so a single large amount
    /// can gain several levels at once.
    pub fn add_progress(&self, amount: u32, needed: u32) -> Self {
        let (completed, current) = match self.progress {
            Some(progress) if progress.amount > 0 => (self.completed_levels(), progress.amount),
            _ => (self.level, 0),
        };
        let mut entry = self.clone();
        entry.set_progress(completed, current.saturating_add(amount), needed);
        entry
    }

    /// Default merge rule: levels add up, progress amounts add up and the
    /// larger threshold wins.
    pub fn merge(&self, other: &ModuleEntry) -> ModuleEntry {
        match (self.progress, other.progress) {
            (None, None) => Self::new(self.id.clone(), self.level.saturating_add(other.level)),
            (left, right) => {
                let completed = self
                    .completed_levels()
                    .saturating_add(other.completed_levels());
                let amount = left
                    .map_or(0, |p| p.amount)
                    .saturating_add(right.map_or(0, |p| p.amount));
                let needed = left
                    .map_or(0, |p| p.needed)
                    .max(right.map_or(0, |p| p.needed));
                Self::incremental(self.id.clone(), completed, amount, needed)
            }
        }
    }

    pub(crate) fn clamp_level(&mut self, max: u32) -> bool {
        if self.level <= max {
            return false;
        }
        self.level = max;
        self.progress = None;
        true
    }

    fn set_progress(&mut self, completed: u32, amount: u32, needed: u32) {
        if needed == 0 {
            self.level = completed;
            self.progress = None;
            return;
        }
        let completed = completed.saturating_add(amount / needed);
        // no room for a partial level above u32::MAX
        let amount = if completed == u32::MAX {
            0
        } else {
            amount % needed
        };
        self.level = completed + u32::from(amount > 0);
        self.progress = Some(Progress { amount, needed });
    }
}

/// Serialized shape of an entry, normalized on load.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StoredEntry {
    id: ModuleId,
    level: u32,
    #[serde(default)]
    progress: Option<Progress>,
}

#[cfg(feature = "serde")]
impl From<StoredEntry> for ModuleEntry {
    fn from(stored: StoredEntry) -> Self {
        let mut entry = Self::new(stored.id, stored.level);
        if let Some(Progress { amount, needed }) = stored.progress {
            let completed = if amount > 0 {
                stored.level.saturating_sub(1)
            } else {
                stored.level
            };
            entry.set_progress(completed, amount, needed);
        }
        entry
    }
}
