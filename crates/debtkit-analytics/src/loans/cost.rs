//! Loan cost analysis.
//!
//! Computes the full cost of an amortizing loan: instalment, interest, fees,
//! the after-tax view of the interest, and the opportunity cost of paying
//! cash instead of borrowing.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use debtkit_core::{Frequency, Money, PaymentSchedule, Percent};

use super::amortization::amortization_schedule;
use super::annuity::{annuity_payment, compound_factor};
use crate::error::{AnalyticsError, AnalyticsResult};

/// Longest loan term accepted, in years.
pub const MAX_TERM_YEARS: u32 = 100;

/// Default annual return assumed for money not spent on the loan.
pub const DEFAULT_OPPORTUNITY_RATE: Decimal = dec!(8);

fn default_opportunity_rate() -> Percent {
    Percent::new(DEFAULT_OPPORTUNITY_RATE)
}

/// Inputs for a loan cost analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysisInput {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual interest rate
    pub interest_rate: Percent,
    /// Loan term in years (fractional terms allowed)
    pub term_years: Decimal,
    /// Payment frequency
    #[serde(default)]
    pub frequency: Frequency,
    /// One-off fees paid at origination
    #[serde(default)]
    pub upfront_fees: Money,
    /// Fees charged with every instalment
    #[serde(default)]
    pub periodic_fees: Money,
    /// Tax rate at which interest is deductible
    #[serde(default)]
    pub tax_rate: Percent,
    /// Annual return the cash could earn elsewhere
    #[serde(default = "default_opportunity_rate")]
    pub opportunity_rate: Percent,
}

impl CostAnalysisInput {
    /// Creates an input with monthly payments and no fees or tax.
    #[must_use]
    pub fn new(principal: Money, interest_rate: Percent, term_years: Decimal) -> Self {
        Self {
            principal,
            interest_rate,
            term_years,
            frequency: Frequency::Monthly,
            upfront_fees: Money::ZERO,
            periodic_fees: Money::ZERO,
            tax_rate: Percent::ZERO,
            opportunity_rate: default_opportunity_rate(),
        }
    }

    /// Sets the payment frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets upfront and periodic fees.
    #[must_use]
    pub fn with_fees(mut self, upfront: Money, periodic: Money) -> Self {
        self.upfront_fees = upfront;
        self.periodic_fees = periodic;
        self
    }

    /// Sets the tax rate.
    #[must_use]
    pub fn with_tax_rate(mut self, tax_rate: Percent) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Sets the opportunity rate.
    #[must_use]
    pub fn with_opportunity_rate(mut self, rate: Percent) -> Self {
        self.opportunity_rate = rate;
        self
    }

    /// Number of instalments implied by the term and frequency.
    ///
    /// # Errors
    ///
    /// Returns an error if the term is not positive, exceeds
    /// [`MAX_TERM_YEARS`], or rounds to zero instalments.
    pub fn periods(&self) -> AnalyticsResult<u32> {
        if self.term_years <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidInput(format!(
                "term_years must be positive, got {}",
                self.term_years
            )));
        }
        if self.term_years > Decimal::from(MAX_TERM_YEARS) {
            return Err(AnalyticsError::InvalidInput(format!(
                "term_years must not exceed {MAX_TERM_YEARS}, got {}",
                self.term_years
            )));
        }

        let periods = (self.term_years * Decimal::from(self.frequency.periods_per_year())).round();
        let periods = periods
            .to_u32()
            .ok_or_else(|| AnalyticsError::MathError("period count out of range".into()))?;
        if periods == 0 {
            return Err(AnalyticsError::InvalidInput(format!(
                "a term of {} years is shorter than one {} period",
                self.term_years,
                self.frequency.to_string().to_lowercase()
            )));
        }
        Ok(periods)
    }

    fn validate(&self) -> AnalyticsResult<()> {
        self.principal.validate_positive("principal")?;
        self.interest_rate.validate("interest_rate")?;
        self.upfront_fees.validate_non_negative("upfront_fees")?;
        self.periodic_fees.validate_non_negative("periodic_fees")?;
        self.tax_rate.validate("tax_rate")?;
        self.opportunity_rate.validate("opportunity_rate")?;
        Ok(())
    }
}

/// Outcome of a loan cost analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostAnalysisResult {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual interest rate
    pub interest_rate: Percent,
    /// Loan term in years
    pub term_years: Decimal,
    /// Payment frequency
    pub frequency: Frequency,
    /// Number of instalments
    pub periods: u32,
    /// Level instalment (principal + interest)
    pub periodic_payment: Money,
    /// Sum of all instalments
    pub total_payment: Money,
    /// Total interest over the term
    pub total_interest: Money,
    /// Upfront plus recurring fees
    pub total_fees: Money,
    /// Interest plus fees
    pub total_cost: Money,
    /// Interest net of the tax deduction
    pub after_tax_interest: Money,
    /// Principal plus after-tax interest
    pub after_tax_cost: Money,
    /// After-tax interest relative to principal
    pub effective_rate: Percent,
    /// Annual return assumed on unspent cash
    pub opportunity_rate: Percent,
    /// Return forgone by paying the principal in cash instead
    pub forgone_return: Money,
    /// Forgone return minus total cost; positive favours borrowing
    pub financing_advantage: Money,
}

/// Runs a loan cost analysis.
///
/// # Errors
///
/// Returns an error for non-positive principal or term, negative fees, or
/// rates outside 0-100%. Inputs whose totals leave the decimal range yield
/// `AnalyticsError::Overflow`.
///
/// # Example
///
/// ```rust
/// use debtkit_analytics::loans::{analyze_loan_cost, CostAnalysisInput};
/// use debtkit_core::{Money, Percent};
/// use rust_decimal_macros::dec;
///
/// let input = CostAnalysisInput::new(Money::new(dec!(100000)), Percent::new(dec!(5)), dec!(5))
///     .with_tax_rate(Percent::new(dec!(30)));
/// let result = analyze_loan_cost(&input).unwrap();
/// assert_eq!(result.periods, 60);
/// assert_eq!(result.periodic_payment.amount(), dec!(1887.12));
/// ```
pub fn analyze_loan_cost(input: &CostAnalysisInput) -> AnalyticsResult<CostAnalysisResult> {
    input.validate()?;
    let periods = input.periods()?;
    let per_year = input.frequency.periods_per_year();
    let n = Decimal::from(periods);

    let rate = input.interest_rate.per_period(per_year);
    let payment = annuity_payment(input.principal, rate, periods)?;
    let total_payment = payment
        .checked_mul(n)
        .ok_or_else(|| out_of_range("total payment"))?;
    let total_interest = total_payment - input.principal;

    let total_fees = input
        .periodic_fees
        .checked_mul(n)
        .and_then(|recurring| input.upfront_fees.checked_add(recurring))
        .ok_or_else(|| out_of_range("total fees"))?;
    let total_cost = total_interest
        .checked_add(total_fees)
        .ok_or_else(|| out_of_range("total cost"))?;
    // schedule totals add instalments and fees together
    total_payment
        .checked_add(total_fees)
        .ok_or_else(|| out_of_range("total outflow"))?;

    let after_tax_interest = total_interest * (Decimal::ONE - input.tax_rate.as_decimal());
    let after_tax_cost = input
        .principal
        .checked_add(after_tax_interest)
        .ok_or_else(|| out_of_range("after-tax cost"))?;
    let effective_rate = after_tax_interest
        .ratio_to(input.principal)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| out_of_range("effective rate"))?;

    let opportunity_growth = compound_factor(input.opportunity_rate.per_period(per_year), periods)?;
    let forgone_return = input
        .principal
        .checked_mul(opportunity_growth - Decimal::ONE)
        .ok_or_else(|| out_of_range("forgone return"))?;
    let financing_advantage = forgone_return - total_cost;

    log::debug!(
        "cost analysis: principal={} rate={} periods={} payment={:.2}",
        input.principal,
        input.interest_rate,
        periods,
        payment.amount()
    );

    Ok(CostAnalysisResult {
        principal: input.principal,
        interest_rate: input.interest_rate,
        term_years: input.term_years,
        frequency: input.frequency,
        periods,
        periodic_payment: payment.round_cents(),
        total_payment: total_payment.round_cents(),
        total_interest: total_interest.round_cents(),
        total_fees: total_fees.round_cents(),
        total_cost: total_cost.round_cents(),
        after_tax_interest: after_tax_interest.round_cents(),
        after_tax_cost: after_tax_cost.round_cents(),
        effective_rate: Percent::new(effective_rate.round_dp(4)),
        opportunity_rate: input.opportunity_rate,
        forgone_return: forgone_return.round_cents(),
        financing_advantage: financing_advantage.round_cents(),
    })
}

fn out_of_range(quantity: &str) -> AnalyticsError {
    AnalyticsError::Overflow(format!("{quantity} exceeds the decimal range"))
}

/// Builds the amortization schedule for a cost analysis input.
///
/// # Errors
///
/// Returns the same validation errors as [`analyze_loan_cost`].
pub fn cost_schedule(input: &CostAnalysisInput) -> AnalyticsResult<PaymentSchedule> {
    input.validate()?;
    let periods = input.periods()?;
    amortization_schedule(
        input.principal,
        input.interest_rate,
        input.frequency,
        periods,
        input.periodic_fees,
    )
}
