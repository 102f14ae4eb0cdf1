//! # Quantity Module
//!
//! Exact quantities for stock levels and cart reservations.
//!
//! Feed, litter and seeds are sold by weight, so a quantity is a decimal
//! (`0.25` kg, `3` bags, `0.01` kg from the custom amount field), never a
//! float. Parsing operator input is the only way a bad value gets in, and it
//! fails with [`CoreError::InvalidQuantity`].

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// A stock level or reserved amount, in the product's own unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Quantity(#[ts(type = "string")] Decimal);

impl Quantity {
    /// Wraps an exact decimal quantity.
    #[inline]
    pub const fn new(value: Decimal) -> Self {
        Quantity(value)
    }

    /// Whole units (bags, bottles, tablets).
    #[inline]
    pub fn from_units(units: i64) -> Self {
        Quantity(Decimal::from(units))
    }

    /// Parses operator input such as `"0.25"` or `" 3 "`.
    ///
    /// Sign is not checked here; the cart decides what a non-positive
    /// quantity means for each operation.
    ///
    /// ## Example
    /// ```rust
    /// use ranil_core::quantity::Quantity;
    ///
    /// assert!(Quantity::parse("0.25").is_ok());
    /// assert!(Quantity::parse("a lot").is_err());
    /// ```
    pub fn parse(input: &str) -> CoreResult<Self> {
        Decimal::from_str(input.trim())
            .map(Quantity)
            .map_err(|_| CoreError::InvalidQuantity {
                value: input.trim().to_string(),
            })
    }

    #[inline]
    pub const fn zero() -> Self {
        Quantity(Decimal::ZERO)
    }

    /// Returns the exact decimal value.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Addition that reports overflow instead of panicking.
    ///
    /// Operator input is unbounded, so adding it to a reservation goes
    /// through here.
    #[inline]
    pub fn checked_add(self, other: Quantity) -> Option<Quantity> {
        self.0.checked_add(other.0).map(Quantity)
    }

    /// Subtraction floored at zero.
    #[inline]
    pub fn saturating_sub(self, other: Quantity) -> Quantity {
        if other.0 >= self.0 {
            Quantity::zero()
        } else {
            Quantity(self.0 - other.0)
        }
    }
}

/// Display drops trailing zeros: `0.25`, `3`, `12.5`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::zero()
    }
}

impl From<Decimal> for Quantity {
    fn from(value: Decimal) -> Self {
        Quantity(value)
    }
}

impl Add for Quantity {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Quantity(self.0 + other.0)
    }
}

impl Sub for Quantity {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Quantity(self.0 - other.0)
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Quantity>>(iter: I) -> Self {
        iter.fold(Quantity::zero(), |acc, q| acc + q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_keeps_fraction() {
        let q = Quantity::parse(" 0.25 ").unwrap();
        assert_eq!(q.value(), Decimal::new(25, 2));
        assert_eq!(q.to_string(), "0.25");
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = Quantity::parse("two kilos").unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidQuantity { ref value } if value == "two kilos"
        ));
        assert!(Quantity::parse("").is_err());
    }

    #[test]
    fn test_display_normalizes() {
        assert_eq!(Quantity::parse("3.00").unwrap().to_string(), "3");
        assert_eq!(Quantity::parse("12.50").unwrap().to_string(), "12.5");
    }

    #[test]
    fn test_saturating_sub() {
        let stock = Quantity::from_units(10);
        assert_eq!(stock.saturating_sub(Quantity::from_units(4)), Quantity::from_units(6));
        assert_eq!(stock.saturating_sub(Quantity::from_units(12)), Quantity::zero());
    }

    #[test]
    fn test_checked_add_overflow() {
        let huge = Quantity::new(Decimal::MAX);
        assert!(huge.checked_add(Quantity::from_units(1)).is_none());
        assert_eq!(
            Quantity::from_units(1).checked_add(Quantity::from_units(2)),
            Some(Quantity::from_units(3))
        );
    }
}
