use caja_core::{DomainError, DomainResult, Money};

/// One product line of the inventory: name, unit price and units on hand.
///
/// The name is the identity of the entry inside an [`crate::Inventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    name: String,
    unit_price: Money,
    stock_quantity: u64,
}

impl InventoryEntry {
    pub fn new(name: impl Into<String>, unit_price: Money, stock_quantity: u64) -> Self {
        Self {
            name: name.into(),
            unit_price,
            stock_quantity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn stock_quantity(&self) -> u64 {
        self.stock_quantity
    }

    /// Price `quantity` units without touching stock.
    ///
    /// Fails with `InvalidQuantity` for `quantity <= 0` and with
    /// `InsufficientStock` (carrying the current stock) when not enough units
    /// are on hand.
    pub fn quote(&self, quantity: i64) -> DomainResult<Money> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantity(quantity));
        }
        let quantity = quantity as u64;
        if quantity > self.stock_quantity {
            return Err(DomainError::insufficient_stock(&self.name, self.stock_quantity));
        }
        self.unit_price.times(quantity)
    }

    /// Remove `quantity` units from stock. Callers quote first.
    pub(crate) fn withdraw(&mut self, quantity: u64) {
        self.stock_quantity = self.stock_quantity.saturating_sub(quantity);
    }
}
