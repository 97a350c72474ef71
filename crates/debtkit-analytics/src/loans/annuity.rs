//! Annuity (level payment) formulas.
//!
//! ## Formulas
//!
//! ```text
//! payment = P × r(1+r)^n / ((1+r)^n − 1)       (P / n when r = 0)
//! periods = −ln(1 − r·B/M) / ln(1 + r)          (B / M when r = 0)
//! ```
//!
//! where `r` is the rate per period, `n` the number of periods, `B` the
//! outstanding balance and `M` the periodic payment.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, MathematicalOps};

use debtkit_core::Money;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Growth factor `(1 + r)^n`.
///
/// # Errors
///
/// Returns `AnalyticsError::Overflow` when the factor leaves the decimal range.
pub fn compound_factor(rate_per_period: Decimal, periods: u32) -> AnalyticsResult<Decimal> {
    Decimal::ONE
        .checked_add(rate_per_period)
        .and_then(|base| base.checked_powi(i64::from(periods)))
        .ok_or_else(|| {
            AnalyticsError::Overflow(format!(
                "(1 + {rate_per_period})^{periods} exceeds the decimal range"
            ))
        })
}

/// Level payment that retires `principal` over `periods` instalments.
///
/// # Errors
///
/// Returns an error if `periods` is zero, the rate is negative, or the
/// compound factor overflows.
///
/// # Example
///
/// ```rust
/// use debtkit_analytics::loans::annuity_payment;
/// use debtkit_core::Money;
/// use rust_decimal_macros::dec;
///
/// // 100k over 5 years at 5% nominal, monthly
/// let payment = annuity_payment(Money::new(dec!(100000)), dec!(0.05) / dec!(12), 60).unwrap();
/// assert_eq!(payment.round_cents().amount(), dec!(1887.12));
/// ```
pub fn annuity_payment(
    principal: Money,
    rate_per_period: Decimal,
    periods: u32,
) -> AnalyticsResult<Money> {
    if periods == 0 {
        return Err(AnalyticsError::InvalidInput(
            "number of payments must be at least 1".into(),
        ));
    }
    if rate_per_period < Decimal::ZERO {
        return Err(AnalyticsError::InvalidInput(format!(
            "rate per period must not be negative, got {rate_per_period}"
        )));
    }

    if rate_per_period.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    // r(1+r)^n / ((1+r)^n − 1) stays near r, so scale the principal last
    let factor = compound_factor(rate_per_period, periods)?;
    let annuity_rate = rate_per_period
        .checked_mul(factor)
        .and_then(|numerator| numerator.checked_div(factor - Decimal::ONE))
        .ok_or_else(|| AnalyticsError::MathError("annuity factor is undefined".into()))?;

    principal.checked_mul(annuity_rate).ok_or_else(|| {
        AnalyticsError::Overflow(format!("payment on principal {principal} exceeds the decimal range"))
    })
}

/// Number of periods (possibly fractional) for `payment` to retire `balance`.
///
/// # Errors
///
/// Returns `AnalyticsError::NeverPaysOff` when the payment does not exceed the
/// interest accruing on the balance.
pub fn payoff_periods(
    balance: Money,
    rate_per_period: Decimal,
    payment: Money,
) -> AnalyticsResult<Decimal> {
    if !payment.is_positive() {
        return Err(AnalyticsError::NeverPaysOff(format!(
            "payment {payment} must be positive"
        )));
    }
    if !balance.is_positive() {
        return Ok(Decimal::ZERO);
    }

    if rate_per_period.is_zero() {
        return balance
            .ratio_to(payment)
            .ok_or_else(|| AnalyticsError::MathError("payment is zero".into()));
    }

    let interest = balance.amount() * rate_per_period;
    if payment.amount() <= interest {
        return Err(AnalyticsError::NeverPaysOff(format!(
            "payment {payment} does not cover periodic interest {:.2}",
            interest
        )));
    }

    let ratio = (interest / payment.amount())
        .to_f64()
        .ok_or_else(|| AnalyticsError::MathError("ratio out of f64 range".into()))?;
    let rate = rate_per_period
        .to_f64()
        .ok_or_else(|| AnalyticsError::MathError("rate out of f64 range".into()))?;

    let periods = -(1.0 - ratio).ln() / rate.ln_1p();
    Decimal::from_f64(periods)
        .ok_or_else(|| AnalyticsError::MathError(format!("period count {periods} is not finite")))
}
