//! Monetary amount type.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::error::{DebtkitError, DebtkitResult};

/// A monetary amount.
///
/// Amounts carry full decimal precision through calculations and are only
/// rounded to cents at the boundary via [`Money::round_cents`].
///
/// # Example
///
/// ```rust
/// use debtkit_core::types::Money;
/// use rust_decimal_macros::dec;
///
/// let fee = Money::new(dec!(12.345));
/// assert_eq!(fee.round_cents().amount(), dec!(12.35));
/// assert!(fee.validate_positive("fee").is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Creates a new amount.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Creates a zero amount.
    #[must_use]
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds to two decimal places, midpoints away from zero.
    #[must_use]
    pub fn round_cents(&self) -> Self {
        Self(self.0.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Clamps negative amounts to zero.
    #[must_use]
    pub fn floor_zero(&self) -> Self {
        Self(self.0.max(Decimal::ZERO))
    }

    /// Divides by another amount, yielding a plain ratio.
    ///
    /// Returns `None` when the divisor is zero.
    #[must_use]
    pub fn ratio_to(&self, other: Money) -> Option<Decimal> {
        self.0.checked_div(other.0)
    }

    /// Adds another amount, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Scales by a factor, returning `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Self)
    }

    /// Validates that the amount is not negative.
    ///
    /// # Errors
    ///
    /// Returns `DebtkitError::InvalidAmount` if the amount is below zero.
    pub fn validate_non_negative(&self, field: &str) -> DebtkitResult<()> {
        if self.0 < Decimal::ZERO {
            return Err(DebtkitError::invalid_amount(
                field,
                self.0,
                "must not be negative",
            ));
        }
        Ok(())
    }

    /// Validates that the amount is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `DebtkitError::InvalidAmount` if the amount is zero or negative.
    pub fn validate_positive(&self, field: &str) -> DebtkitResult<()> {
        if self.0 <= Decimal::ZERO {
            return Err(DebtkitError::invalid_amount(field, self.0, "must be positive"));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl From<Money> for Decimal {
    fn from(m: Money) -> Self {
        m.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, rhs: Decimal) -> Money {
        Money(self.0 * rhs)
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, rhs: Decimal) -> Money {
        Money(self.0 / rhs)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_cents_midpoint() {
        assert_eq!(Money::new(dec!(0.125)).round_cents().amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(-0.125)).round_cents().amount(), dec!(-0.13));
        assert_eq!(Money::new(dec!(10.004)).round_cents().amount(), dec!(10.00));
    }

    #[test]
    fn test_validation() {
        assert!(Money::new(dec!(0)).validate_non_negative("fees").is_ok());
        assert!(Money::new(dec!(0)).validate_positive("principal").is_err());
        let err = Money::new(dec!(-1)).validate_non_negative("fees").unwrap_err();
        assert!(err.to_string().contains("fees"));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(100));
        let b = Money::new(dec!(40));
        assert_eq!(a - b, Money::new(dec!(60)));
        assert_eq!((b - a).floor_zero(), Money::ZERO);
        assert_eq!(a * dec!(0.5), Money::new(dec!(50)));
        assert_eq!(b.ratio_to(a), Some(dec!(0.4)));
        assert_eq!(a.ratio_to(Money::ZERO), None);

        let total: Money = [a, b].iter().sum();
        assert_eq!(total, Money::new(dec!(140)));
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::new(dec!(100));
        assert_eq!(a.checked_mul(dec!(3)), Some(Money::new(dec!(300))));
        assert_eq!(a.checked_add(a), Some(Money::new(dec!(200))));
        assert_eq!(Money::new(Decimal::MAX).checked_mul(dec!(2)), None);
        assert_eq!(Money::new(Decimal::MAX).checked_add(a), None);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Money::new(dec!(1250.5))).unwrap();
        assert_eq!(json, "1250.5");
        let back: Money = serde_json::from_str("99.99").unwrap();
        assert_eq!(back.amount(), dec!(99.99));
    }
}
