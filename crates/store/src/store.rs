use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use caja_core::{Aggregate, AggregateRoot, DomainError, Money};
use caja_inventory::{Inventory, InventoryEntry};
use caja_sales::{SaleRecord, SalesLedger, SalesReport};

use crate::clock::{Clock, SystemClock};
use crate::error::FileError;
use crate::files;

/// Command: Purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub product: String,
    pub quantity: i64,
    pub occurred_at: NaiveDateTime,
}

/// Command: ReplaceInventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceInventory {
    pub entries: Vec<InventoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    Purchase(Purchase),
    ReplaceInventory(ReplaceInventory),
}

/// Event: ProductSold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSold {
    pub product: String,
    pub quantity: u64,
    pub unit_price: Money,
    pub total_price: Money,
    pub occurred_at: NaiveDateTime,
}

/// Event: InventoryReplaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryReplaced {
    pub entries: Vec<InventoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ProductSold(ProductSold),
    InventoryReplaced(InventoryReplaced),
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub product: String,
    pub quantity: u64,
    pub unit_price: Money,
    pub total_price: Money,
    pub sold_at: NaiveDateTime,
}

impl From<&ProductSold> for PurchaseReceipt {
    fn from(e: &ProductSold) -> Self {
        Self {
            product: e.product.clone(),
            quantity: e.quantity,
            unit_price: e.unit_price,
            total_price: e.total_price,
            sold_at: e.occurred_at,
        }
    }
}

/// Aggregate root: the till's inventory and sales history.
///
/// Stock decrements and sale records only ever change together, through
/// [`StoreEvent::ProductSold`]. A rejected command leaves the store untouched.
#[derive(Debug, Clone)]
pub struct Store<C = SystemClock> {
    inventory: Inventory,
    ledger: SalesLedger,
    version: u64,
    clock: C,
}

impl Store {
    /// A store with no products, stamping sales with the local wall clock.
    pub fn new() -> Self {
        Self::with_clock(Inventory::new(), SystemClock)
    }

    /// A store opened with the default seed catalog.
    pub fn with_default_inventory() -> Self {
        Self::with_clock(Inventory::default_catalog(), SystemClock)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Store<C> {
    pub fn with_clock(inventory: Inventory, clock: C) -> Self {
        Self {
            inventory,
            ledger: SalesLedger::new(),
            version: 0,
            clock,
        }
    }

    /// Current inventory, in catalog order.
    pub fn list_inventory(&self) -> &[InventoryEntry] {
        self.inventory.entries()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    /// Sell `quantity` units of `product`, stamped with the store's clock.
    pub fn purchase(
        &mut self,
        product: &str,
        quantity: i64,
    ) -> Result<PurchaseReceipt, DomainError> {
        let now = self.clock.now();
        self.purchase_at(product, quantity, now)
    }

    /// Sell `quantity` units of `product` at an explicit time.
    pub fn purchase_at(
        &mut self,
        product: &str,
        quantity: i64,
        occurred_at: NaiveDateTime,
    ) -> Result<PurchaseReceipt, DomainError> {
        let cmd = StoreCommand::Purchase(Purchase {
            product: product.to_string(),
            quantity,
            occurred_at,
        });

        let events = match self.execute(&cmd) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(product, quantity, error = %err, "purchase rejected");
                return Err(err);
            }
        };

        match events.first() {
            Some(StoreEvent::ProductSold(sold)) => {
                tracing::info!(
                    product,
                    quantity,
                    total = %sold.total_price,
                    "purchase recorded"
                );
                Ok(PurchaseReceipt::from(sold))
            }
            _ => Err(DomainError::invariant("purchase produced no sale")),
        }
    }

    /// Sales history re-priced at current inventory prices.
    ///
    /// Fails only when a revenue figure leaves the decimal range.
    pub fn generate_sales_report(&self) -> Result<SalesReport, DomainError> {
        let report = SalesReport::generate(&self.ledger, &self.inventory).inspect_err(|err| {
            tracing::warn!(error = %err, "sales report failed");
        })?;
        tracing::debug!(
            rows = report.len(),
            total = %report.total_revenue(),
            "sales report generated"
        );
        Ok(report)
    }

    /// Write the sales report as CSV; returns the path actually written.
    pub fn export_sales_report_csv(&self, path: impl AsRef<Path>) -> Result<PathBuf, FileError> {
        let result = files::resolve_export_path(path.as_ref()).and_then(|target| {
            let report = self.generate_sales_report()?;
            files::write_sales_report(&target, &report)?;
            Ok(target)
        });
        log_file_result("sales report export", path.as_ref(), &result);
        result
    }

    /// Write the inventory as CSV; returns the path actually written.
    pub fn export_inventory_csv(&self, path: impl AsRef<Path>) -> Result<PathBuf, FileError> {
        let result = files::resolve_export_path(path.as_ref()).and_then(|target| {
            files::write_inventory(&target, &self.inventory)?;
            Ok(target)
        });
        log_file_result("inventory export", path.as_ref(), &result);
        result
    }

    /// Replace the whole inventory with the rows of a CSV file.
    ///
    /// Every row is parsed before anything changes; on error the current
    /// inventory is kept as is. Returns the number of products loaded.
    pub fn load_inventory_csv(&mut self, path: impl AsRef<Path>) -> Result<usize, FileError> {
        let result = files::resolve_import_path(path.as_ref())
            .and_then(|source| files::read_inventory(&source))
            .and_then(|entries| {
                let cmd = StoreCommand::ReplaceInventory(ReplaceInventory { entries });
                self.execute(&cmd)?;
                Ok(self.inventory.len())
            });

        match &result {
            Ok(products) => {
                tracing::info!(path = %path.as_ref().display(), products, "inventory loaded")
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.as_ref().display(),
                    error = %err,
                    "inventory load failed"
                )
            }
        }
        result
    }

    fn handle_purchase(&self, cmd: &Purchase) -> Result<Vec<StoreEvent>, DomainError> {
        let total_price = self.inventory.quote(&cmd.product, cmd.quantity)?;
        let unit_price = self
            .inventory
            .price_of(&cmd.product)
            .ok_or_else(|| DomainError::unknown_product(&cmd.product))?;

        Ok(vec![StoreEvent::ProductSold(ProductSold {
            product: cmd.product.clone(),
            quantity: cmd.quantity as u64,
            unit_price,
            total_price,
            occurred_at: cmd.occurred_at,
        })])
    }
}

fn log_file_result(operation: &str, requested: &Path, result: &Result<PathBuf, FileError>) {
    match result {
        Ok(target) => tracing::info!(operation, path = %target.display(), "csv written"),
        Err(err) => tracing::warn!(
            operation,
            path = %requested.display(),
            error = %err,
            "csv export failed"
        ),
    }
}

impl<C> AggregateRoot for Store<C> {
    fn version(&self) -> u64 {
        self.version
    }
}

impl<C: Clock> Aggregate for Store<C> {
    type Command = StoreCommand;
    type Event = StoreEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            StoreEvent::ProductSold(e) => {
                match self.inventory.withdraw(&e.product, e.quantity) {
                    Ok(()) => self
                        .ledger
                        .record(SaleRecord::new(e.occurred_at, &e.product, e.quantity)),
                    Err(err) => {
                        tracing::error!(product = %e.product, error = %err, "sale not applied")
                    }
                }
            }
            StoreEvent::InventoryReplaced(e) => {
                self.inventory = Inventory::from_entries(e.entries.iter().cloned());
            }
        }

        // +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            StoreCommand::Purchase(cmd) => self.handle_purchase(cmd),
            StoreCommand::ReplaceInventory(cmd) => {
                Ok(vec![StoreEvent::InventoryReplaced(InventoryReplaced {
                    entries: cmd.entries.clone(),
                })])
            }
        }
    }
}
