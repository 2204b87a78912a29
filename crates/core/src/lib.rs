//! `caja-core`: domain building blocks for the till.
//!
//! This crate contains **pure domain** primitives (no IO, no clocks, no UI).

pub mod aggregate;
pub mod error;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use value_object::{Money, ValueObject};
