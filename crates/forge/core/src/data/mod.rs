//! Namespaced key/value storage attached to artifacts.
//!
//! Every artifact carries two stores with different lifetimes:
//!
//! - **persisted**: durable, edited by module contributions during rebuild
//!   or by explicit player interactions; never wiped by the engine
//! - **volatile**: cleared and fully repopulated on every rebuild
//!
//! Hooks only ever receive a [`DataView`]. The mutators live on
//! [`DataStore`], which is not reachable through a view:
//!
//! ```compile_fail
//! use forge_core::data::DataView;
//! use forge_core::keys::DataKey;
//!
//! fn hook(view: &dyn DataView) {
//!     view.put_int(DataKey::from_static("forge:charges"), 1);
//! }
//! ```
//!
//! [`RestrictedData`] narrows a mutable store further by hiding protected keys.

mod patch;
mod restricted;
mod store;
mod value;

pub use patch::{DataEdit, DataPatch};
pub use restricted::RestrictedData;
pub use store::{DataStore, DataView, ModData};
pub use value::{Blob, DataType, DataValue};
