//! # Prices and Totals
//!
//! Every amount on the sales screen is a [`Money`]: whole cents in an `i64`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  f64:    1763.38 * 2 + 1798.64   = 5325.400000000001                    │
//! │  cents:  176338  * 2 + 179864    = 532540            → "5325.40"        │
//! │                                                                         │
//! │  Decimals become cents once (half-up); line and cart totals are        │
//! │  integer sums after that, saturating at the i64 bounds.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two-Digit Rule
//! Every price and total shown or shared uses the same rule:
//! multiply by 100, round half-up, split into integer and fractional cents,
//! left-pad the fraction to two digits, join with `.`.
//!
//! ```rust
//! use habemus_core::money::{format_amount, Money};
//!
//! assert_eq!(format_amount(1849.8), "1849.80");
//! assert_eq!(format_amount(1763.375), "1763.38");
//!
//! let unit = Money::from_cents(176338);
//! assert_eq!((unit * 2).to_string(), "$3526.76");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// An amount in cents, single currency. Signed, so differences need no
/// special casing.
///
/// ```text
/// Product.price(customer_type) ──► CartItem.subtotal ──► SalesCalculation.total
///                 │                                               │
///                 └──► "$1763.38" in the list      "Total: $5666.98" ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps a cent count.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal price such as `2645.07`.
    ///
    /// Rounds half-up at the cent boundary (`floor(amount * 100 + 0.5)`).
    /// The multiplication happens in binary floating point, so an amount
    /// such as `1.005` (stored as `1.00499999…`) lands on `100` cents.
    ///
    /// ## Example
    /// ```rust
    /// use habemus_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(2645.07).cents(), 264507);
    /// assert_eq!(Money::from_decimal(2645.075).cents(), 264508);
    /// assert_eq!(Money::from_decimal(0.125).cents(), 13);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0 + 0.5).floor() as i64)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Fractional cents, 0..=99 regardless of sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Line total for `qty` units.
    ///
    /// Saturates at the `i64` bounds; cart quantities are not capped.
    ///
    /// ## Example
    /// ```rust
    /// use habemus_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(214022); // $2140.22
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 642066);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Renders the amount without a currency symbol: `"2645.07"`.
    ///
    /// Negative values carry a leading `-`.
    pub fn format_amount(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Formats a decimal amount with the two-digit display rule.
///
/// This is the entry point for amounts that did not start life as `Money`
/// (for example a `REAL` column or a user-typed value).
///
/// ## Example
/// ```rust
/// use habemus_core::money::format_amount;
///
/// assert_eq!(format_amount(2645.07), "2645.07");
/// assert_eq!(format_amount(2645.075), "2645.08");
/// ```
pub fn format_amount(amount: f64) -> String {
    Money::from_decimal(amount).format_amount()
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way the order summary and totals card print it: `$1849.80`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
