//! Stat keys and the two-layer stat snapshot.
//!
//! Stats are produced in two passes during a rebuild:
//!
//! 1. **Base** ([`StatsBuilder`]): materials and module contributions are
//!    stacked per stat and collapsed into [`BaseStats`].
//! 2. **Multiplier** ([`MultiplierBuilder`]): the stat-multiplier hook is
//!    dispatched per float stat and the products form a sparse
//!    [`MultiplierStats`] layer.
//!
//! Both layers are frozen into a [`StatsSnapshot`].

mod bonus;
mod catalog;
pub mod key;
mod multiplier;
mod snapshot;

pub use bonus::{BaseStats, Bonus, BonusStack, StatsBuilder};
pub use catalog::StatCatalog;
pub use key::{FloatStat, StatKey, StatKeyError, TierStat};
pub use multiplier::{MultiplierBuilder, MultiplierStats};
pub use snapshot::StatsSnapshot;
