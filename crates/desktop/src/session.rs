//! One till session: the store plus the state of the open views.

use std::path::Path;

use caja_store::{Clock, Store, SystemClock};

use crate::exit::{ExitOutcome, Prompter, SaveChoice};
use crate::messages::{self, FileOperation, Notice};
use crate::views::{InventorySort, InventoryTable, SalesReportView, SortColumn};

/// Front-end facing handle over a [`Store`].
///
/// Every user action maps to one method returning something to render: a
/// [`Notice`], a table, or an exit decision.
#[derive(Debug)]
pub struct Session<C = SystemClock> {
    store: Store<C>,
    sort: InventorySort,
}

impl<C: Clock> Session<C> {
    pub fn new(store: Store<C>) -> Self {
        Self {
            store,
            sort: InventorySort::default(),
        }
    }

    pub fn store(&self) -> &Store<C> {
        &self.store
    }

    /// Purchase from raw form input; the quantity must be an integer.
    pub fn purchase(&mut self, product: &str, quantity_input: &str) -> Notice {
        match quantity_input.trim().parse::<i64>() {
            Ok(quantity) => messages::purchase_notice(self.store.purchase(product, quantity)),
            Err(_) => messages::quantity_not_integer_notice(),
        }
    }

    /// Open the inventory table in catalog order, forgetting earlier sort clicks.
    pub fn show_inventory(&mut self) -> InventoryTable {
        self.sort = InventorySort::default();
        InventoryTable::new(self.store.list_inventory())
    }

    /// Header click on the open inventory table.
    pub fn sort_inventory(&mut self, column: SortColumn) -> InventoryTable {
        let direction = self.sort.click(column);
        let mut table = InventoryTable::new(self.store.list_inventory());
        table.sort_by(column, direction);
        table
    }

    /// The report view, or the notice to show when it cannot be computed.
    pub fn sales_report(&self) -> Result<SalesReportView, Notice> {
        self.store
            .generate_sales_report()
            .map(|report| SalesReportView::from(&report))
            .map_err(messages::report_failure_notice)
    }

    pub fn export_sales_report(&self, path: &str) -> Notice {
        messages::export_notice(
            FileOperation::ExportSalesReport,
            self.store.export_sales_report_csv(path),
        )
    }

    pub fn export_inventory(&self, path: &str) -> Notice {
        messages::export_notice(
            FileOperation::ExportInventory,
            self.store.export_inventory_csv(path),
        )
    }

    pub fn load_inventory(&mut self, path: &str) -> Notice {
        let result = self.store.load_inventory_csv(path);
        messages::load_notice(Path::new(path), result)
    }

    /// Run the exit dialogs.
    ///
    /// Saving writes the inventory first, then the sales report; the till closes
    /// afterwards even if a save failed or was dismissed.
    pub fn request_exit(&mut self, prompter: &mut impl Prompter) -> ExitOutcome {
        match prompter.ask_save() {
            SaveChoice::Save => {
                let mut notices = Vec::new();
                for op in [FileOperation::ExportInventory, FileOperation::ExportSalesReport] {
                    let Some(path) = prompter.pick_save_path(op) else {
                        continue;
                    };
                    let notice = match op {
                        FileOperation::ExportInventory => self.export_inventory(&path),
                        _ => self.export_sales_report(&path),
                    };
                    notices.push(notice);
                }
                let saved = notices.iter().filter(|n| !n.is_error()).count();
                tracing::info!(saved, attempted = notices.len(), "exit after save");
                ExitOutcome::Exit { notices }
            }
            SaveChoice::DontSave if prompter.confirm_discard() => {
                tracing::info!("exit without saving");
                ExitOutcome::Exit {
                    notices: Vec::new(),
                }
            }
            SaveChoice::DontSave | SaveChoice::Cancel => ExitOutcome::Stay,
        }
    }
}
