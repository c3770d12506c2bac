//! Type-safe price representation using decimal arithmetic.
//!
//! Menu prices arrive from the backend as JSON numbers; carrying them as
//! [`Decimal`] avoids the float drift that would show up in cart subtotals.
//! The campus deployment is single-currency (USD), so there is no currency
//! code on the type.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store's currency.
///
/// Amounts are expected to be non-negative; the backend is the source of
/// truth for menu prices and never serves negative ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(500).to_string(), "$5.00");
        assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
        assert_eq!(Price::from_cents(0).to_string(), "$0.00");
    }

    #[test]
    fn test_times() {
        let price = Price::from_cents(500);
        assert_eq!(price.times(3), Price::from_cents(1500));
        assert_eq!(price.times(0), Price::ZERO);
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(500), Price::from_cents(325)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(825));

        let empty: Price = std::iter::empty::<Price>().sum();
        assert_eq!(empty, Price::ZERO);
    }

    #[test]
    fn test_add_assign() {
        let mut total = Price::ZERO;
        total += Price::from_cents(150);
        total += Price::from_cents(250);
        assert_eq!(total, Price::from_cents(400));
    }

    #[test]
    fn test_deserialize_json_number() {
        // The backend serves numeric columns as JSON numbers.
        let price: Price = serde_json::from_str("5.5").unwrap();
        assert_eq!(price, Price::from_cents(550));
    }

    #[test]
    fn test_serialize_preserves_scale() {
        let json = serde_json::to_string(&Price::from_cents(1050)).unwrap();
        assert_eq!(json, "\"10.50\"");
    }
}
