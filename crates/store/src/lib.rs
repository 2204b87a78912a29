//! `caja-store`: the till's ledger.
//!
//! [`Store`] owns the inventory and the sales history and exposes every query,
//! mutation and report the till needs: purchases, the sales report, and CSV
//! export/import. It holds no reference to any UI and needs no locking: one
//! owner, one thread.

pub mod clock;
pub mod error;
pub mod files;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{FileError, StoreError};
pub use store::{
    InventoryReplaced, ProductSold, Purchase, PurchaseReceipt, ReplaceInventory, Store,
    StoreCommand, StoreEvent,
};

pub use caja_core::{DomainError, Money};
pub use caja_inventory::{Inventory, InventoryEntry};
pub use caja_sales::{SaleRecord, SalesLedger, SalesReport, SalesReportRow};
