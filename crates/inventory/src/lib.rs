//! Inventory domain module.
//!
//! Product catalog with unit prices and stock levels, implemented purely as
//! deterministic domain logic (no IO, no clocks, no storage).

pub mod catalog;
pub mod entry;

pub use catalog::Inventory;
pub use entry::InventoryEntry;
