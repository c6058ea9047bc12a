//! Currency amounts.
//!
//! All prices and totals are `Money`: a non-float decimal with cent rounding
//! done one way everywhere (half away from zero).

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Number of decimal places money is rounded to.
pub const CENT_PLACES: u32 = 2;

/// Monetary amount in a single (implicit) currency.
///
/// Arithmetic keeps full precision; call [`Money::round_cents`] where the
/// domain says rounding happens. Serializes as a two-decimal string.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Amount from an integer number of cents (`360` is `3.60`).
    pub const fn from_cents(cents: i64) -> Self {
        // `Decimal::new` is not `const`; build the same value from its parts.
        let abs = cents.unsigned_abs();
        Self(Decimal::from_parts(
            abs as u32,
            (abs >> 32) as u32,
            0,
            cents < 0,
            CENT_PLACES,
        ))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Round to cents, midpoint away from zero (`0.005` -> `0.01`).
    pub fn round_cents(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Unrounded product of this unit price and a quantity.
    ///
    /// Saturates at the largest representable amount instead of panicking.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl ValueObject for Money {}

impl Add for Money {
    type Output = Money;

    /// Saturating: sums over untrusted log rows must not panic.
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    /// Always exactly two decimals (`17.8` renders as `17.80`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.round_cents().0;
        rounded.rescale(CENT_PLACES);
        fmt::Display::fmt(&rounded, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Accepts plain decimals with an optional leading `$` (`"3.6"`, `"$3.60"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        Decimal::from_str(digits)
            .map(Money)
            .map_err(|e| DomainError::validation(format!("invalid amount {trimmed:?}: {e}")))
    }
}

impl TryFrom<String> for Money {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}
