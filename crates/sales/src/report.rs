use chrono::{NaiveDate, NaiveTime};

use caja_core::{DomainResult, Money};
use caja_inventory::Inventory;

use crate::record::{SaleRecord, SalesLedger};

/// One line of the sales report.
///
/// `unit_price` is the product's price in the inventory *when the report is
/// generated*, not the price charged at the time of the sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesReportRow {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub product: String,
    pub unit_price: Money,
    pub quantity: u64,
    pub revenue: Money,
}

/// Sales history re-priced against the current inventory, plus its total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesReport {
    rows: Vec<SalesReportRow>,
    total_revenue: Money,
}

impl SalesReport {
    /// Build the report: one row per sale, days ascending, insertion order within a
    /// day. Products no longer stocked are priced at zero.
    ///
    /// Fails with `AmountOverflow` when a row or the total leaves the decimal range.
    pub fn generate(ledger: &SalesLedger, inventory: &Inventory) -> DomainResult<Self> {
        let rows = ledger
            .iter()
            .map(|sale| Self::price_row(sale, inventory))
            .collect::<DomainResult<Vec<_>>>()?;
        let total_revenue = Money::try_sum(rows.iter().map(|row| row.revenue))?;

        Ok(Self {
            rows,
            total_revenue,
        })
    }

    fn price_row(sale: &SaleRecord, inventory: &Inventory) -> DomainResult<SalesReportRow> {
        let unit_price = inventory.price_of(sale.product()).unwrap_or(Money::ZERO);
        Ok(SalesReportRow {
            date: sale.date(),
            time: sale.time(),
            product: sale.product().to_string(),
            unit_price,
            quantity: sale.quantity(),
            revenue: unit_price.times(sale.quantity())?,
        })
    }

    pub fn rows(&self) -> &[SalesReportRow] {
        &self.rows
    }

    pub fn total_revenue(&self) -> Money {
        self.total_revenue
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caja_core::DomainError;
    use caja_inventory::InventoryEntry;
    use chrono::NaiveDateTime;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn ledger() -> SalesLedger {
        let mut ledger = SalesLedger::new();
        ledger.record(SaleRecord::new(at("2024-05-02 10:00:00"), "pulsera", 5));
        ledger.record(SaleRecord::new(at("2024-05-01 12:30:00"), "postit", 2));
        ledger.record(SaleRecord::new(at("2024-05-01 12:31:00"), "pulsera", 1));
        ledger
    }

    #[test]
    fn rows_are_sorted_by_day_and_priced_from_inventory() {
        let report = SalesReport::generate(&ledger(), &Inventory::default_catalog()).unwrap();

        let summary: Vec<_> = report
            .rows()
            .iter()
            .map(|r| (r.date.to_string(), r.product.as_str(), r.revenue.to_string()))
            .collect();
        assert_eq!(
            summary,
            [
                ("2024-05-01".to_string(), "postit", "7".to_string()),
                ("2024-05-01".to_string(), "pulsera", "3".to_string()),
                ("2024-05-02".to_string(), "pulsera", "15".to_string()),
            ]
        );
        assert_eq!(report.total_revenue(), Money::from_cents(2500));
    }

    #[test]
    fn products_missing_from_inventory_are_priced_at_zero() {
        let inventory = Inventory::from_entries([InventoryEntry::new(
            "pulsera",
            Money::from_cents(300),
            50,
        )]);
        let report = SalesReport::generate(&ledger(), &inventory).unwrap();

        let postit = &report.rows()[0];
        assert_eq!(postit.product, "postit");
        assert_eq!(postit.unit_price, Money::ZERO);
        assert_eq!(postit.revenue, Money::ZERO);
        assert_eq!(report.len(), 3);
        assert_eq!(report.total_revenue(), Money::from_cents(1800));
    }

    #[test]
    fn report_uses_current_price_not_price_at_sale_time() {
        let mut inventory = Inventory::default_catalog();
        inventory.upsert(InventoryEntry::new("pulsera", Money::from_cents(400), 44));

        let report = SalesReport::generate(&ledger(), &inventory).unwrap();
        let last = report.rows().last().unwrap();
        assert_eq!(last.unit_price, Money::from_cents(400));
        assert_eq!(last.revenue, Money::from_cents(2000));
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let huge = Money::parse("50000000000000000000000000000").unwrap();
        let inventory = Inventory::from_entries([InventoryEntry::new("caro", huge, 10)]);
        let mut ledger = SalesLedger::new();
        ledger.record(SaleRecord::new(at("2024-05-01 09:00:00"), "caro", 1));
        ledger.record(SaleRecord::new(at("2024-05-01 09:01:00"), "caro", 1));

        assert!(matches!(
            SalesReport::generate(&ledger, &inventory),
            Err(DomainError::AmountOverflow(_))
        ));
    }

    #[test]
    fn empty_ledger_yields_empty_report() {
        let report =
            SalesReport::generate(&SalesLedger::new(), &Inventory::default_catalog()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.total_revenue(), Money::ZERO);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: total revenue is the sum of row revenues, and generation
            /// is idempotent.
            #[test]
            fn total_equals_sum_of_rows(
                sales in proptest::collection::vec((0usize..4, 1u64..20, 0u32..5), 0..30)
            ) {
                let products = ["pulsera", "sticker", "llavero", "gone"];
                let mut ledger = SalesLedger::new();
                for (idx, qty, day) in sales {
                    let when = at("2024-01-01 08:00:00") + chrono::Duration::days(i64::from(day));
                    ledger.record(SaleRecord::new(when, products[idx], qty));
                }
                let inventory = Inventory::default_catalog();

                let report = SalesReport::generate(&ledger, &inventory).unwrap();
                let summed = Money::try_sum(report.rows().iter().map(|r| r.revenue)).unwrap();
                prop_assert_eq!(report.total_revenue(), summed);
                prop_assert_eq!(report.len(), ledger.len());
                prop_assert_eq!(report, SalesReport::generate(&ledger, &inventory).unwrap());
            }
        }
    }
}
