//! Percentage rate type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DebtkitError, DebtkitResult};

/// A rate quoted in percent (5.0 = 5%).
///
/// Interest rates, tax rates and usage ratios all travel through the API in
/// percent, matching how they are entered on a loan offer.
///
/// # Example
///
/// ```rust
/// use debtkit_core::types::Percent;
/// use rust_decimal_macros::dec;
///
/// let rate = Percent::new(dec!(6.0));
/// assert_eq!(rate.as_decimal(), dec!(0.06));
/// assert_eq!(rate.per_period(12), dec!(0.005));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    /// Creates a rate from a percentage value.
    #[must_use]
    pub fn new(percentage: Decimal) -> Self {
        Self(percentage)
    }

    /// Creates a rate from a decimal fraction (0.05 = 5%).
    #[must_use]
    pub fn from_decimal(fraction: Decimal) -> Self {
        Self(fraction * Decimal::ONE_HUNDRED)
    }

    /// Returns the rate in percent.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a decimal fraction (percentage / 100).
    #[must_use]
    pub fn as_decimal(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns the per-period rate for a nominal annual rate.
    ///
    /// # Panics
    ///
    /// Panics if `periods_per_year` is zero.
    #[must_use]
    pub fn per_period(&self, periods_per_year: u32) -> Decimal {
        self.as_decimal() / Decimal::from(periods_per_year)
    }

    /// Returns true if the rate is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Validates that the rate lies within `[min, max]` percent.
    ///
    /// # Errors
    ///
    /// Returns `DebtkitError::InvalidRate` if the rate is outside the range.
    pub fn validate_range(&self, field: &str, min: Decimal, max: Decimal) -> DebtkitResult<()> {
        if self.0 < min || self.0 > max {
            return Err(DebtkitError::invalid_rate(
                field,
                self.0,
                format!("must be between {min}% and {max}%"),
            ));
        }
        Ok(())
    }

    /// Validates that the rate lies within 0% to 100%.
    ///
    /// # Errors
    ///
    /// Returns `DebtkitError::InvalidRate` if the rate is outside the range.
    pub fn validate(&self, field: &str) -> DebtkitResult<()> {
        self.validate_range(field, Decimal::ZERO, Decimal::ONE_HUNDRED)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

impl From<Decimal> for Percent {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_conversions() {
        let rate = Percent::from_decimal(dec!(0.035));
        assert_eq!(rate.value(), dec!(3.5));
        assert_eq!(rate.as_decimal(), dec!(0.035));
        assert_eq!(Percent::new(dec!(4)).per_period(4), dec!(0.01));
    }

    #[test]
    fn test_validation() {
        assert!(Percent::new(dec!(0)).validate("interest_rate").is_ok());
        assert!(Percent::new(dec!(100)).validate("tax_rate").is_ok());
        assert!(Percent::new(dec!(-0.1)).validate("interest_rate").is_err());
        assert!(Percent::new(dec!(120)).validate("tax_rate").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Percent::new(dec!(5)).to_string(), "5.00%");
    }
}
