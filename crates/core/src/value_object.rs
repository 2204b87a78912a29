//! Value object trait: equality by value, not identity.
//!
//! Value objects are defined entirely by their attribute values; two value objects
//! with the same values are the same thing.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Literal prefix used when a monetary amount is shown to a person.
pub const CURRENCY_PREFIX: &str = "S/";

/// Decimal places used for currency display.
const DISPLAY_DECIMALS: u32 = 2;

/// A non-negative monetary amount.
///
/// Stored exactly; rounding only happens when the amount is rendered with
/// [`Money::currency`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Wrap a decimal amount, rejecting negatives.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_zero() {
            return Ok(Self::ZERO);
        }
        if amount.is_sign_negative() {
            return Err(DomainError::validation(format!(
                "amount must be non-negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// Parse a bare decimal such as `3`, `3.5` or ` 10.00 `.
    ///
    /// Scientific notation (`1e2`) is accepted as well.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| DomainError::validation(format!("invalid amount '{trimmed}': {e}")))?;
        Self::new(amount)
    }

    /// Amount from a whole number of cents (`350` is `3.50`).
    pub fn from_cents(cents: u64) -> Self {
        Money(Decimal::from_i128_with_scale(i128::from(cents), DISPLAY_DECIMALS))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit amount.
    pub fn times(&self, quantity: u64) -> DomainResult<Money> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Money)
            .ok_or_else(|| DomainError::overflow(format!("{self} x {quantity}")))
    }

    pub fn checked_add(self, rhs: Money) -> DomainResult<Money> {
        self.0
            .checked_add(rhs.0)
            .map(Money)
            .ok_or_else(|| DomainError::overflow(format!("{self} + {rhs}")))
    }

    /// Sum of `amounts`, failing on the first overflow.
    pub fn try_sum(amounts: impl IntoIterator<Item = Money>) -> DomainResult<Money> {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, Money::checked_add)
    }

    /// Display adapter rendering `S/<amount with 2 decimals>`.
    pub fn currency(&self) -> Currency {
        Currency(*self)
    }

    /// The amount rounded to two decimals, midpoint away from zero.
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Bare decimal without trailing zeros (`3`, `3.5`, `10`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

/// Currency rendering of a [`Money`] amount, see [`Money::currency`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Currency(Money);

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_PREFIX}{:.2}", self.0.rounded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(raw: &str) -> Money {
        Money::parse(raw).unwrap()
    }

    #[test]
    fn parse_accepts_integers_decimals_and_whitespace() {
        assert_eq!(money("3").amount(), Decimal::from(3));
        assert_eq!(money(" 3.5 ").amount(), Decimal::new(35, 1));
        assert_eq!(money("1e2").amount(), Decimal::from(100));
    }

    #[test]
    fn parse_rejects_negative_and_garbage() {
        match Money::parse("-1").unwrap_err() {
            DomainError::Validation(msg) if msg.contains("non-negative") => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert!(Money::parse("tres").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn negative_zero_is_accepted_as_zero() {
        let zero = Money::parse("-0.00").unwrap();
        assert_eq!(zero.amount(), Decimal::ZERO);
    }

    #[test]
    fn currency_pads_to_two_decimals() {
        assert_eq!(money("3").currency().to_string(), "S/3.00");
        assert_eq!(money("3.5").currency().to_string(), "S/3.50");
        assert_eq!(Money::ZERO.currency().to_string(), "S/0.00");
    }

    #[test]
    fn currency_rounds_midpoint_away_from_zero() {
        assert_eq!(money("0.125").currency().to_string(), "S/0.13");
        assert_eq!(money("2.675").currency().to_string(), "S/2.68");
        assert_eq!(money("1.004").currency().to_string(), "S/1.00");
    }

    #[test]
    fn display_is_normalized_bare_decimal() {
        assert_eq!(money("3.00").to_string(), "3");
        assert_eq!(money("3.50").to_string(), "3.5");
        assert_eq!(money("10").to_string(), "10");
    }

    #[test]
    fn from_cents_keeps_two_decimals() {
        assert_eq!(Money::from_cents(350), money("3.5"));
        assert_eq!(Money::from_cents(1000).to_string(), "10");
    }

    #[test]
    fn times_and_sum() {
        assert_eq!(money("3").times(5).unwrap(), money("15"));
        assert_eq!(money("3.5").times(0).unwrap(), Money::ZERO);

        let total = Money::try_sum([money("1.25"), money("2.75"), money("3")]).unwrap();
        assert_eq!(total, money("7"));
    }

    #[test]
    fn arithmetic_past_the_decimal_range_is_an_error() {
        let max = money("79228162514264337593543950335");
        assert!(matches!(max.times(2), Err(DomainError::AmountOverflow(_))));
        assert_eq!(max.times(1).unwrap(), max);

        let half = money("50000000000000000000000000000");
        assert!(matches!(
            Money::try_sum([half, half]),
            Err(DomainError::AmountOverflow(_))
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: normalized display parses back to the same amount.
            #[test]
            fn display_parses_back(cents in 0u64..10_000_000) {
                let original = Money::new(Decimal::new(cents as i64, 2)).unwrap();
                let reparsed = Money::parse(&original.to_string()).unwrap();
                prop_assert_eq!(original, reparsed);
            }

            /// Property: multiplying by a quantity equals repeated addition.
            #[test]
            fn times_matches_repeated_addition(cents in 0u64..100_000, qty in 0u64..50) {
                let unit = Money::new(Decimal::new(cents as i64, 2)).unwrap();
                let summed = Money::try_sum(std::iter::repeat(unit).take(qty as usize)).unwrap();
                prop_assert_eq!(unit.times(qty).unwrap(), summed);
            }
        }
    }
}
