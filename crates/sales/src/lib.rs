//! Sales domain module.
//!
//! Append-only log of executed purchases grouped by calendar day, and the
//! sales report derived from it (no IO, no clocks, no storage).

pub mod record;
pub mod report;

pub use record::{SaleRecord, SalesLedger};
pub use report::{SalesReport, SalesReportRow};
