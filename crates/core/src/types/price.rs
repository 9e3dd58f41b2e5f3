//! Type-safe price representation.
//!
//! Prices are whole Vietnamese đồng amounts - VND has no minor unit, so a
//! non-negative integer is exact and no decimal arithmetic is needed.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A price in whole Vietnamese đồng.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero price (empty cart total).
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole đồng amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole đồng.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Format for display with Vietnamese digit grouping (e.g. `35.000đ`).
    #[must_use]
    pub fn display(&self) -> String {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        let offset = digits.len() % 3;

        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - offset) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        grouped.push('đ');
        grouped
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_grouping() {
        assert_eq!(Price::new(0).display(), "0đ");
        assert_eq!(Price::new(800).display(), "800đ");
        assert_eq!(Price::new(8000).display(), "8.000đ");
        assert_eq!(Price::new(35000).display(), "35.000đ");
        assert_eq!(Price::new(1250000).display(), "1.250.000đ");
    }

    #[test]
    fn test_arithmetic() {
        let total = Price::new(8000) * 2 + Price::new(10000);
        assert_eq!(total, Price::new(26000));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(8000), Price::new(10000), Price::new(35000)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), 53000);
    }
}
