//! `caja-desktop`
//!
//! **Responsibility:** presentation layer of the till.
//!
//! This crate provides:
//! - view models for the inventory table (sortable) and the sales report
//! - the user-visible text for every purchase and file outcome
//! - the exit flow (save both, leave without saving, or stay)
//! - a terminal front-end driving all of the above
//!
//! It owns no business logic; every decision is delegated to [`caja_store::Store`].

pub mod config;
pub mod console;
pub mod exit;
pub mod messages;
pub mod session;
pub mod views;

pub use config::AppConfig;
pub use console::Console;
pub use exit::{ExitOutcome, Prompter, SaveChoice};
pub use messages::{FileOperation, Notice, NoticeKind};
pub use session::Session;
pub use views::{InventoryRow, InventoryTable, SalesReportView, SortColumn, SortDirection};
