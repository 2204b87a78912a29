//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Deterministic business failures only (unknown products, bad quantities, stock
/// shortfalls, malformed domain data). File and IO failures belong to the store crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The product is not part of the current inventory.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// A purchase quantity was zero or negative.
    #[error("invalid quantity: {0} (must be positive)")]
    InvalidQuantity(i64),

    /// Not enough units on hand; `available` is the stock before the attempt.
    #[error("insufficient stock for {product}: {available} available")]
    InsufficientStock { product: String, available: u64 },

    /// A monetary amount exceeded the representable range.
    #[error("amount overflow: {0}")]
    AmountOverflow(String),

    /// A value failed validation (e.g. negative price, blank product name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn unknown_product(name: impl Into<String>) -> Self {
        Self::UnknownProduct(name.into())
    }

    pub fn insufficient_stock(product: impl Into<String>, available: u64) -> Self {
        Self::InsufficientStock {
            product: product.into(),
            available,
        }
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::AmountOverflow(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
