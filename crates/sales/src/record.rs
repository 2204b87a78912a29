use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// One executed purchase: when, what and how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleRecord {
    date: NaiveDate,
    time: NaiveTime,
    product: String,
    quantity: u64,
}

impl SaleRecord {
    /// Stamp a sale at `at`; sub-second precision is dropped.
    pub fn new(at: NaiveDateTime, product: impl Into<String>, quantity: u64) -> Self {
        let time = at.time();
        Self {
            date: at.date(),
            time: time.with_nanosecond(0).unwrap_or(time),
            product: product.into(),
            quantity,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

/// Append-only sales history, grouped by day.
///
/// Iteration walks days in ascending order and, within a day, sales in the order
/// they were recorded. Records are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesLedger {
    days: BTreeMap<NaiveDate, Vec<SaleRecord>>,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sale: SaleRecord) {
        self.days.entry(sale.date).or_default().push(sale);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SaleRecord> {
        self.days.values().flatten()
    }

    /// Sales recorded on `date`, in insertion order.
    pub fn on(&self, date: NaiveDate) -> &[SaleRecord] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
