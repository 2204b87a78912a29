//! Table view models for the inventory and the sales report.

use core::cmp::Ordering;

use caja_store::{InventoryEntry, Money, SalesReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    Product,
    Price,
    Quantity,
}

impl SortColumn {
    pub const ALL: [SortColumn; 3] = [SortColumn::Product, SortColumn::Price, SortColumn::Quantity];

    pub fn header(self) -> &'static str {
        match self {
            SortColumn::Product => "Producto",
            SortColumn::Price => "Precio",
            SortColumn::Quantity => "Cantidad",
        }
    }

    fn index(self) -> usize {
        match self {
            SortColumn::Product => 0,
            SortColumn::Price => 1,
            SortColumn::Quantity => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Header-click state of an open inventory table.
///
/// Each column remembers its own direction: the first click on a column sorts
/// ascending and every further click on that column flips it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySort {
    next: [SortDirection; 3],
}

impl InventorySort {
    /// Register a click on `column` and return the direction to sort by.
    pub fn click(&mut self, column: SortColumn) -> SortDirection {
        let slot = &mut self.next[column.index()];
        let direction = *slot;
        *slot = direction.flipped();
        direction
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRow {
    pub product: String,
    /// Unit price as shown, e.g. `S/3.50`.
    pub price: String,
    pub quantity: u64,
    unit_price: Money,
}

impl From<&InventoryEntry> for InventoryRow {
    fn from(entry: &InventoryEntry) -> Self {
        Self {
            product: entry.name().to_string(),
            price: entry.unit_price().currency().to_string(),
            quantity: entry.stock_quantity(),
            unit_price: entry.unit_price(),
        }
    }
}

/// Inventory as a table, in catalog order until sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryTable {
    pub rows: Vec<InventoryRow>,
}

impl InventoryTable {
    pub fn new(entries: &[InventoryEntry]) -> Self {
        Self {
            rows: entries.iter().map(InventoryRow::from).collect(),
        }
    }

    /// Names alphabetically, price and quantity numerically.
    ///
    /// Ties keep catalog order when ascending and come out in reverse catalog
    /// order when descending, so a descending sort is the exact reverse of the
    /// ascending one.
    pub fn sort_by(&mut self, column: SortColumn, direction: SortDirection) {
        let compare = |a: &InventoryRow, b: &InventoryRow| -> Ordering {
            match column {
                SortColumn::Product => a.product.cmp(&b.product),
                SortColumn::Price => a.unit_price.cmp(&b.unit_price),
                SortColumn::Quantity => a.quantity.cmp(&b.quantity),
            }
        };
        self.rows.sort_by(compare);
        if direction == SortDirection::Descending {
            self.rows.reverse();
        }
    }

    pub fn products(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.product.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReportLine {
    pub fecha: String,
    pub hora: String,
    pub producto: String,
    pub precio: String,
    pub cantidad: u64,
    pub ingresos: String,
}

pub const SALES_REPORT_COLUMNS: [&str; 6] = [
    "Fecha",
    "Hora",
    "Producto",
    "Precio",
    "Cantidad Vendida",
    "Ingresos",
];

/// Sales report as shown on screen: formatted rows and a total label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReportView {
    pub lines: Vec<SalesReportLine>,
    pub total_label: String,
}

impl From<&SalesReport> for SalesReportView {
    fn from(report: &SalesReport) -> Self {
        let lines = report
            .rows()
            .iter()
            .map(|row| SalesReportLine {
                fecha: row.date.format("%Y-%m-%d").to_string(),
                hora: row.time.format("%H:%M:%S").to_string(),
                producto: row.product.clone(),
                precio: row.unit_price.currency().to_string(),
                cantidad: row.quantity,
                ingresos: row.revenue.currency().to_string(),
            })
            .collect();

        Self {
            lines,
            total_label: format!("Ingreso Total: {}", report.total_revenue().currency()),
        }
    }
}
