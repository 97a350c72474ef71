//! Debt brake (debt capacity) calculation.
//!
//! The debt brake caps total borrowing at a fixed share of annual revenue.
//!
//! ## Formula
//!
//! ```text
//! limit     = revenue × limit_ratio              (0.35% by default)
//! capacity  = max(0, limit − existing_debt)
//! usage     = existing_debt / limit × 100        (0 when there is no debt)
//! service   = (revenue − expenses) × service_ratio
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use debtkit_core::{Money, Percent};

use crate::error::AnalyticsResult;
use crate::policy::DebtBrakePolicy;

/// Inputs for the debt brake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtBrakeInput {
    /// Annual revenue
    pub revenue: Money,
    /// Annual operating expenses
    #[serde(default)]
    pub expenses: Money,
    /// Debt already on the balance sheet
    #[serde(default)]
    pub existing_debt: Money,
    /// Share of net income available for debt service (0.30 = 30%)
    #[serde(default)]
    pub debt_service_ratio: Option<Decimal>,
}

impl DebtBrakeInput {
    /// Creates an input with only revenue set.
    #[must_use]
    pub fn new(revenue: Money) -> Self {
        Self {
            revenue,
            expenses: Money::ZERO,
            existing_debt: Money::ZERO,
            debt_service_ratio: None,
        }
    }

    /// Sets annual expenses.
    #[must_use]
    pub fn with_expenses(mut self, expenses: Money) -> Self {
        self.expenses = expenses;
        self
    }

    /// Sets existing debt.
    #[must_use]
    pub fn with_existing_debt(mut self, existing_debt: Money) -> Self {
        self.existing_debt = existing_debt;
        self
    }

    /// Sets the debt service ratio.
    #[must_use]
    pub fn with_service_ratio(mut self, ratio: Decimal) -> Self {
        self.debt_service_ratio = Some(ratio);
        self
    }
}

/// How close existing debt is to the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtBrakeStatus {
    /// Usage at or below the warning threshold
    WithinLimits,
    /// Usage above the warning threshold, still under the limit
    ApproachingLimit,
    /// Existing debt above the limit
    ExceedsLimit,
}

impl fmt::Display for DebtBrakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DebtBrakeStatus::WithinLimits => "Within Limits",
            DebtBrakeStatus::ApproachingLimit => "Approaching Limit",
            DebtBrakeStatus::ExceedsLimit => "Exceeds Limit",
        };
        write!(f, "{name}")
    }
}

/// Debt brake outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebtBrakeResult {
    /// Maximum debt allowed by the brake
    pub debt_limit: Money,
    /// Headroom below the limit, never negative
    pub available_capacity: Money,
    /// Existing debt as a percentage of the limit
    pub debt_usage: Percent,
    /// Revenue minus expenses
    pub net_income: Money,
    /// Annual amount affordable for debt service
    pub max_debt_service: Money,
    /// Monthly amount affordable for debt service
    pub max_monthly_debt_service: Money,
    /// Classification of the usage
    pub status: DebtBrakeStatus,
    /// Applied limit as a percentage of revenue (0.35)
    pub limit_percentage: Percent,
    /// Echo of the revenue input
    pub revenue: Money,
    /// Echo of the expenses input
    pub expenses: Money,
    /// Echo of the existing debt input
    pub existing_debt: Money,
}

/// Runs the debt brake calculation.
///
/// # Errors
///
/// Returns an error if revenue is not positive, an amount is negative, or the
/// debt service ratio lies outside `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use debtkit_analytics::debt_brake::{calculate_debt_brake, DebtBrakeInput, DebtBrakeStatus};
/// use debtkit_analytics::policy::DebtBrakePolicy;
/// use debtkit_core::Money;
/// use rust_decimal_macros::dec;
///
/// let input = DebtBrakeInput::new(Money::new(dec!(1000000)))
///     .with_existing_debt(Money::new(dec!(1000)));
/// let result = calculate_debt_brake(&input, &DebtBrakePolicy::default()).unwrap();
/// assert_eq!(result.debt_limit.amount(), dec!(3500));
/// assert_eq!(result.available_capacity.amount(), dec!(2500));
/// assert_eq!(result.status, DebtBrakeStatus::WithinLimits);
/// ```
pub fn calculate_debt_brake(
    input: &DebtBrakeInput,
    policy: &DebtBrakePolicy,
) -> AnalyticsResult<DebtBrakeResult> {
    input.revenue.validate_positive("revenue")?;
    input.expenses.validate_non_negative("expenses")?;
    input.existing_debt.validate_non_negative("existing_debt")?;

    let service_ratio = input
        .debt_service_ratio
        .unwrap_or(policy.default_service_ratio);
    Percent::from_decimal(service_ratio).validate("debt_service_ratio")?;

    let debt_limit = input.revenue * policy.limit_ratio;
    let available_capacity = (debt_limit - input.existing_debt).floor_zero();

    let usage = if input.existing_debt.is_positive() {
        input
            .existing_debt
            .ratio_to(debt_limit)
            .map_or(Decimal::ZERO, |r| r * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    };

    let status = if usage > Decimal::ONE_HUNDRED {
        DebtBrakeStatus::ExceedsLimit
    } else if usage > policy.warning_usage_pct {
        DebtBrakeStatus::ApproachingLimit
    } else {
        DebtBrakeStatus::WithinLimits
    };

    let net_income = input.revenue - input.expenses;
    let max_debt_service = (net_income * service_ratio).floor_zero();

    log::debug!(
        "debt brake: revenue={} limit={} usage={:.2}% status={:?}",
        input.revenue,
        debt_limit,
        usage,
        status
    );

    Ok(DebtBrakeResult {
        debt_limit,
        available_capacity,
        debt_usage: Percent::new(usage),
        net_income,
        max_debt_service,
        max_monthly_debt_service: max_debt_service / Decimal::from(12),
        status,
        limit_percentage: Percent::from_decimal(policy.limit_ratio),
        revenue: input.revenue,
        expenses: input.expenses,
        existing_debt: input.existing_debt,
    })
}
