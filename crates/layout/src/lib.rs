//! Property slotting and storage layout for typeproj
//!
//! Works on base (unprojected) class definitions:
//! - slots: memoized slotted-property lists and per-property slots
//! - chains: the four enumeration orders and their `first`/`next` links
//! - table: global type-table indices
//! - planner: `PropertyLayout` and `ClassLayout` records for emitters

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chains;
pub mod planner;
pub mod slots;
pub mod table;

pub use chains::Chain;
pub use planner::{ClassLayout, LayoutPlanner, PropertyLayout};
pub use slots::{is_slotted, SlotPlanner};
pub use table::TypeTable;
