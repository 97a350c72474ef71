//! Amortization schedules.
//!
//! Rows are kept cent-exact: each period's interest and instalment are
//! rounded to cents and the final instalment repays whatever balance is left,
//! so the schedule always closes at exactly zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use debtkit_core::{Frequency, Money, PaymentSchedule, Percent, ScheduledPayment};

use super::annuity::annuity_payment;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Builds a level-payment amortization schedule.
///
/// # Arguments
///
/// * `principal` - Amount borrowed
/// * `annual_rate` - Nominal annual interest rate
/// * `frequency` - Payment frequency
/// * `periods` - Number of instalments
/// * `periodic_fee` - Fee charged alongside every instalment
///
/// # Errors
///
/// Returns an error if the inputs do not describe a valid annuity.
pub fn amortization_schedule(
    principal: Money,
    annual_rate: Percent,
    frequency: Frequency,
    periods: u32,
    periodic_fee: Money,
) -> AnalyticsResult<PaymentSchedule> {
    principal.validate_positive("principal")?;
    periodic_fee.validate_non_negative("periodic_fee")?;

    let rate = annual_rate.per_period(frequency.periods_per_year());
    let payment = annuity_payment(principal, rate, periods)?.round_cents();

    let mut balance = principal.round_cents();
    let mut rows = Vec::with_capacity(periods as usize);

    for period in 1..=periods {
        let interest = (balance * rate).round_cents();
        let principal_part = if period == periods {
            balance
        } else {
            (payment - interest).min(balance)
        };

        if principal_part.amount() < Decimal::ZERO {
            return Err(AnalyticsError::ScheduleGenerationFailed(format!(
                "instalment {payment} below interest {interest} in period {period}"
            )));
        }

        balance -= principal_part;
        rows.push(ScheduledPayment {
            period,
            payment: principal_part + interest,
            principal: principal_part,
            interest,
            fee: periodic_fee,
            balance,
        });
    }

    log::trace!(
        "built {} period schedule for {} at {}",
        rows.len(),
        principal,
        annual_rate
    );

    Ok(PaymentSchedule::new(rows))
}

/// One loan year of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummary {
    /// Loan year, starting at 1
    pub year: u32,
    /// Principal repaid during the year
    pub principal: Money,
    /// Interest paid during the year
    pub interest: Money,
    /// Recurring fees paid during the year
    pub fees: Money,
    /// Balance outstanding at year end
    pub closing_balance: Money,
}

/// Rolls a schedule up into loan years.
///
/// A trailing partial year is reported as its own entry.
pub fn yearly_summary(schedule: &PaymentSchedule, frequency: Frequency) -> Vec<YearlySummary> {
    let per_year = frequency.periods_per_year() as usize;

    schedule
        .payments()
        .chunks(per_year)
        .zip(1u32..)
        .map(|(rows, year)| YearlySummary {
            year,
            principal: rows.iter().map(|r| r.principal).sum(),
            interest: rows.iter().map(|r| r.interest).sum(),
            fees: rows.iter().map(|r| r.fee).sum(),
            closing_balance: rows.last().map_or(Money::ZERO, |r| r.balance),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedule_closes_at_zero() {
        let schedule = amortization_schedule(
            Money::new(dec!(100000)),
            Percent::new(dec!(5)),
            Frequency::Monthly,
            60,
            Money::ZERO,
        )
        .unwrap();

        assert_eq!(schedule.len(), 60);
        assert_eq!(schedule.closing_balance(), Money::ZERO);
        assert_eq!(schedule.total_principal(), Money::new(dec!(100000)));

        let first = schedule.payments()[0];
        // 100000 × 0.05/12 = 416.67
        assert_eq!(first.interest.amount(), dec!(416.67));
        assert_eq!(first.payment.amount(), dec!(1887.12));
        assert_eq!(first.principal.amount(), dec!(1470.45));
    }

    #[test]
    fn test_schedule_total_interest_close_to_closed_form() {
        let schedule = amortization_schedule(
            Money::new(dec!(100000)),
            Percent::new(dec!(5)),
            Frequency::Monthly,
            60,
            Money::ZERO,
        )
        .unwrap();
        // closed form: 1887.1234 × 60 − 100000 = 13227.40
        let diff = (schedule.total_interest().amount() - dec!(13227.40)).abs();
        assert!(diff < dec!(1), "interest drift {diff}");
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = amortization_schedule(
            Money::new(dec!(1200)),
            Percent::ZERO,
            Frequency::Quarterly,
            4,
            Money::new(dec!(5)),
        )
        .unwrap();

        assert!(schedule.iter().all(|r| r.interest == Money::ZERO));
        assert!(schedule.iter().all(|r| r.payment.amount() == dec!(300)));
        assert_eq!(schedule.total_fees().amount(), dec!(20));
    }

    #[test]
    fn test_yearly_summary_partial_year() {
        let schedule = amortization_schedule(
            Money::new(dec!(30000)),
            Percent::new(dec!(4)),
            Frequency::Monthly,
            18,
            Money::new(dec!(10)),
        )
        .unwrap();

        let years = yearly_summary(&schedule, Frequency::Monthly);
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 1);
        assert_eq!(years[0].fees.amount(), dec!(120));
        assert_eq!(years[1].fees.amount(), dec!(60));
        assert_eq!(years[1].closing_balance, Money::ZERO);

        let principal: Money = years.iter().map(|y| y.principal).sum();
        assert_eq!(principal, Money::new(dec!(30000)));
    }

    proptest! {
        #[test]
        fn prop_schedule_repays_principal_exactly(
            principal in 1_000u32..5_000_000,
            rate_bp in 0u32..2_000,
            periods in 1u32..360,
        ) {
            let schedule = amortization_schedule(
                Money::new(Decimal::from(principal)),
                Percent::new(Decimal::new(i64::from(rate_bp), 2)),
                Frequency::Monthly,
                periods,
                Money::ZERO,
            ).unwrap();

            prop_assert_eq!(schedule.closing_balance(), Money::ZERO);
            prop_assert_eq!(schedule.total_principal(), Money::new(Decimal::from(principal)));
            prop_assert!(schedule.iter().all(|r| r.balance.amount() >= Decimal::ZERO));
        }
    }
}
