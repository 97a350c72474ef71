//! Debt-equity swap analysis.
//!
//! Part of the debt is converted into shares handed to the creditor at the
//! pre-swap equity valuation:
//!
//! ```text
//! creditor_stake = converted / (equity + converted) × 100
//! interest_saved = converted × rate
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use debtkit_core::{Money, Percent};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Inputs for a debt-equity swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquitySwapInput {
    /// Debt outstanding before the swap
    pub total_debt: Money,
    /// Portion of the debt converted into equity
    pub conversion_amount: Money,
    /// Equity value before the swap
    pub equity_value: Money,
    /// Annual interest rate carried by the converted debt
    #[serde(default)]
    pub interest_rate: Percent,
    /// Optional EBITDA for leverage ratios
    #[serde(default)]
    pub ebitda: Option<Money>,
}

/// Outcome of a debt-equity swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquitySwapResult {
    /// Debt left after conversion
    pub remaining_debt: Money,
    /// Equity value after conversion
    pub post_swap_equity: Money,
    /// Ownership handed to the creditor
    pub creditor_stake: Percent,
    /// Ownership kept by existing owners
    pub owner_stake: Percent,
    /// Yearly interest no longer payable
    pub annual_interest_saved: Money,
    /// Debt / equity before the swap
    pub debt_to_equity_before: Decimal,
    /// Debt / equity after the swap
    pub debt_to_equity_after: Decimal,
    /// Debt / EBITDA before the swap, when EBITDA is positive
    pub debt_to_ebitda_before: Option<Decimal>,
    /// Debt / EBITDA after the swap, when EBITDA is positive
    pub debt_to_ebitda_after: Option<Decimal>,
}

/// Analyses a debt-equity swap.
///
/// # Errors
///
/// Returns an error if the conversion amount is not positive or exceeds the
/// total debt, the equity value is not positive, or the rate is out of range.
pub fn analyze_equity_swap(input: &EquitySwapInput) -> AnalyticsResult<EquitySwapResult> {
    input.total_debt.validate_positive("total_debt")?;
    input.conversion_amount.validate_positive("conversion_amount")?;
    input.equity_value.validate_positive("equity_value")?;
    input.interest_rate.validate("interest_rate")?;

    if input.conversion_amount > input.total_debt {
        return Err(AnalyticsError::InvalidInput(format!(
            "conversion amount {} exceeds total debt {}",
            input.conversion_amount, input.total_debt
        )));
    }

    let remaining_debt = input.total_debt - input.conversion_amount;
    let post_swap_equity = input.equity_value + input.conversion_amount;

    let stake = input
        .conversion_amount
        .ratio_to(post_swap_equity)
        .ok_or_else(|| AnalyticsError::MathError("post-swap equity is zero".into()))?
        * Decimal::ONE_HUNDRED;
    let creditor_stake = Percent::new(stake.round_dp(4));
    let owner_stake = Percent::new(Decimal::ONE_HUNDRED - creditor_stake.value());

    let leverage = |debt: Money| {
        input
            .ebitda
            .filter(Money::is_positive)
            .and_then(|ebitda| debt.ratio_to(ebitda))
            .map(|r| r.round_dp(4))
    };

    let result = EquitySwapResult {
        remaining_debt,
        post_swap_equity,
        creditor_stake,
        owner_stake,
        annual_interest_saved: (input.conversion_amount * input.interest_rate.as_decimal())
            .round_cents(),
        debt_to_equity_before: input
            .total_debt
            .ratio_to(input.equity_value)
            .unwrap_or_default()
            .round_dp(4),
        debt_to_equity_after: remaining_debt
            .ratio_to(post_swap_equity)
            .unwrap_or_default()
            .round_dp(4),
        debt_to_ebitda_before: leverage(input.total_debt),
        debt_to_ebitda_after: leverage(remaining_debt),
    };

    log::debug!(
        "equity swap: converting {} hands the creditor {}",
        input.conversion_amount,
        result.creditor_stake
    );

    Ok(result)
}
