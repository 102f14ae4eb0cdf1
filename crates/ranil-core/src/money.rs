//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Bulk goods make it worse: feed is sold by the quarter kilo,           │
//! │    0.25 kg × ₱60.50 = ₱15.125 (not representable in whole cents)       │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals                                   │
//! │    Every line total and sum is kept exact.                              │
//! │    Rounding to centavos happens ONCE, when the value is displayed.      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ranil_core::money::Money;
//! use ranil_core::quantity::Quantity;
//!
//! let price = Money::from_cents(16500); // ₱165.00
//! let line = price * Quantity::parse("0.25").unwrap();
//! assert_eq!(line.to_string(), "41.25");
//! ```

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::quantity::Quantity;

/// Decimal places of the display currency (centavos).
pub const CURRENCY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents an exact monetary amount.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative values for refunds and adjustments
/// - **No intermediate rounding**: `price × quantity` keeps every digit
/// - **Serialized as a string**: `"356.25"`, so JSON never goes through f64
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.line_total
///                                                 │
///                         Cart.total ◄────────────┘
///                              │
///                              ▼
///                     SaleRecord.total ──► Receipt "Total Amount"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use ranil_core::money::Money;
    ///
    /// let price = Money::from_cents(6050); // ₱60.50
    /// assert_eq!(price.to_string(), "60.50");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CURRENCY_DECIMALS))
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub fn from_major(major: i64) -> Self {
        Money(Decimal::from(major))
    }

    /// Parses an amount such as `"60.5"` or `"485"`.
    pub fn parse(input: &str) -> Option<Self> {
        Decimal::from_str(input.trim()).ok().map(Money)
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to the currency's minor unit, half away from zero.
    ///
    /// This is the ONLY place rounding happens. Call it at the display
    /// boundary, never in the middle of a calculation.
    ///
    /// ## Example
    /// ```rust
    /// use ranil_core::money::Money;
    ///
    /// let exact = Money::parse("15.125").unwrap();
    /// assert_eq!(exact.rounded().amount().to_string(), "15.13");
    /// ```
    pub fn rounded(&self) -> Money {
        let mut value = self
            .0
            .round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(CURRENCY_DECIMALS);
        Money(value)
    }

    /// Returns the amount in cents after display rounding.
    pub fn to_cents(&self) -> i64 {
        (self.rounded().0 * Decimal::ONE_HUNDRED)
            .to_i64()
            .unwrap_or_default()
    }

    /// Multiplies money by a (possibly fractional) quantity, exactly.
    ///
    /// ## Example
    /// ```rust
    /// use ranil_core::money::Money;
    /// use ranil_core::quantity::Quantity;
    ///
    /// let unit_price = Money::from_major(105);
    /// let line_total = unit_price.multiply_quantity(Quantity::from_units(3));
    /// assert_eq!(line_total, Money::from_major(315));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Quantity) -> Self {
        Money(self.0 * qty.value())
    }

    /// Formats with thousands separators and two decimals, e.g. `1,234.50`.
    ///
    /// Matches how amounts are printed on receipts and reports.
    pub fn format_grouped(&self) -> String {
        let rounded = self.rounded().0;
        let text = rounded.abs().to_string();
        let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}.{}", sign, grouped, frac)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount rounded to two decimals, without a symbol.
///
/// ## Note
/// The currency symbol belongs to the store configuration, not the value.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded().0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a quantity (for line totals).
impl Mul<Quantity> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Quantity) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Multiplication by a whole number.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(s: &str) -> Quantity {
        Quantity::parse(s).unwrap()
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(6050);
        assert_eq!(money.amount(), Decimal::new(605, 1));
        assert_eq!(money.to_cents(), 6050);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_major(5)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!(a + b, Money::from_major(15));
        assert_eq!(a - b, Money::from_major(5));
        assert_eq!(a * 3, Money::from_major(30));
    }

    #[test]
    fn test_fractional_quantity_is_exact() {
        // 0.25 kg at ₱60.50 = ₱15.125, kept exact until display
        let line = Money::parse("60.5").unwrap() * qty("0.25");
        assert_eq!(line.amount(), Decimal::new(15125, 3));
        assert_eq!(line.to_string(), "15.13");
    }

    #[test]
    fn test_sum_rounds_only_once() {
        // Three lines of ₱0.005 each: rounding per line would give 0.03,
        // rounding the exact sum gives 0.02
        let lines = vec![Money::parse("0.005").unwrap(); 3];
        let total: Money = lines.iter().sum();
        assert_eq!(total.amount(), Decimal::new(15, 3));
        assert_eq!(total.to_string(), "0.02");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Money::from_major(356).format_grouped(), "356.00");
        assert_eq!(Money::from_cents(123450).format_grouped(), "1,234.50");
        assert_eq!(Money::from_major(1_000_000).format_grouped(), "1,000,000.00");
        assert_eq!(Money::from_cents(-123450).format_grouped(), "-1,234.50");
        assert_eq!(Money::zero().format_grouped(), "0.00");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert!(!negative.is_positive());
    }

    #[test]
    fn test_serializes_as_exact_string() {
        let money = Money::parse("356.25").unwrap();
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"356.25\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }
}
