use caja_core::{DomainError, DomainResult, Money};

use crate::entry::InventoryEntry;

/// Product catalog keyed by product name, kept in insertion order.
///
/// Names are unique: inserting an existing name replaces that entry's price and
/// stock in place, so the original position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog a fresh till opens with.
    pub fn default_catalog() -> Self {
        Self::from_entries([
            InventoryEntry::new("pulsera", Money::from_cents(300), 50),
            InventoryEntry::new("sticker", Money::from_cents(100), 200),
            InventoryEntry::new("llavero", Money::from_cents(1000), 12),
            InventoryEntry::new("postit", Money::from_cents(350), 12),
        ])
    }

    /// Build a catalog from rows; a later row with a repeated name wins.
    pub fn from_entries(entries: impl IntoIterator<Item = InventoryEntry>) -> Self {
        let mut inventory = Self::new();
        for entry in entries {
            inventory.upsert(entry);
        }
        inventory
    }

    /// Insert a new entry or overwrite the existing one with the same name.
    pub fn upsert(&mut self, entry: InventoryEntry) {
        match self.position(entry.name()) {
            Some(idx) => self.entries[idx] = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&InventoryEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Current unit price of a product, if it is stocked.
    pub fn price_of(&self, name: &str) -> Option<Money> {
        self.get(name).map(InventoryEntry::unit_price)
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate a sale of `quantity` units of `name` and return its total price.
    ///
    /// Checks run in a fixed order: unknown product, then quantity, then stock.
    pub fn quote(&self, name: &str, quantity: i64) -> DomainResult<Money> {
        let entry = self
            .get(name)
            .ok_or_else(|| DomainError::unknown_product(name))?;
        entry.quote(quantity)
    }

    /// Take `quantity` units of `name` out of stock.
    ///
    /// Only call with a quantity already accepted by [`Inventory::quote`].
    pub fn withdraw(&mut self, name: &str, quantity: u64) -> DomainResult<()> {
        let idx = self
            .position(name)
            .ok_or_else(|| DomainError::unknown_product(name))?;
        self.entries[idx].withdraw(quantity);
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a InventoryEntry;
    type IntoIter = std::slice::Iter<'a, InventoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
