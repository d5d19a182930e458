//! Type-safe price representation in integer minor units.
//!
//! Monetary values never touch floating point: a [`Price`] is a non-negative
//! integer count of the smallest currency unit (e.g., cents). Arithmetic is
//! checked; an overflowing subtotal is an error, not a wrap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the smallest currency unit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in minor units.
    #[must_use]
    pub const fn from_minor_units(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, returning `None` on overflow.
    #[must_use]
    pub const fn checked_mul(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(amount) => Some(Self(amount)),
            None => None,
        }
    }

    /// Add another price, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(amount) => Some(Self(amount)),
            None => None,
        }
    }

    /// Decimal view of the amount, scaled to two fractional digits.
    ///
    /// Display-only; all arithmetic stays on the integer representation.
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        Decimal::new(i64::try_from(self.0).unwrap_or(i64::MAX), 2)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.as_decimal())
    }
}
