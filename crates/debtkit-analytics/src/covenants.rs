//! Financial covenant tracking.
//!
//! Three ratios are checked against the lender thresholds in
//! [`CovenantThresholds`]:
//!
//! | Covenant | Ratio | Test |
//! |---|---|---|
//! | Leverage | total debt / EBITDA | at most 3.0 |
//! | Liquidity | current assets / current liabilities | at least 1.2 |
//! | Gearing | total debt / net worth | at most 2.0 |
//!
//! A ratio whose denominator is zero or negative is reported as 0, marked
//! undefined and tested at that value. An undefined leverage or gearing ratio
//! therefore passes, while an undefined current ratio falls below its minimum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use debtkit_core::Money;

use crate::error::AnalyticsResult;
use crate::policy::CovenantThresholds;

/// Balance sheet and earnings figures tested by the covenants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CovenantInput {
    /// Total interest-bearing debt
    pub total_debt: Money,
    /// Earnings before interest, taxes, depreciation and amortization
    pub ebitda: Money,
    /// Current assets
    pub current_assets: Money,
    /// Current liabilities
    pub current_liabilities: Money,
    /// Net worth (book equity)
    pub net_worth: Money,
}

/// Which covenant a check belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Covenant {
    /// Debt / EBITDA
    DebtToEbitda,
    /// Current assets / current liabilities
    CurrentRatio,
    /// Debt / net worth
    DebtToEquity,
}

impl Covenant {
    /// Human-readable name.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Covenant::DebtToEbitda => "Debt / EBITDA",
            Covenant::CurrentRatio => "Current Ratio",
            Covenant::DebtToEquity => "Debt / Equity",
        }
    }
}

impl fmt::Display for Covenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Direction of a covenant test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// The ratio must not exceed the threshold
    Maximum,
    /// The ratio must not fall below the threshold
    Minimum,
}

/// Result of one covenant test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CovenantCheck {
    /// The covenant tested
    pub covenant: Covenant,
    /// Computed ratio, 0 when undefined
    pub value: Decimal,
    /// False when the ratio's denominator is not positive
    pub defined: bool,
    /// Threshold from the policy
    pub threshold: Decimal,
    /// Whether the threshold is an upper or lower bound
    pub bound: Bound,
    /// Whether the covenant holds
    pub compliant: bool,
    /// Distance to the threshold, positive when compliant
    pub headroom: Option<Decimal>,
}

/// All covenant tests for one set of figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CovenantReport {
    /// Individual checks in a fixed order
    pub checks: Vec<CovenantCheck>,
    /// True when every check passes
    pub overall_compliant: bool,
    /// Number of breached covenants
    pub breaches: usize,
}

impl CovenantReport {
    /// Looks up the check for `covenant`.
    #[must_use]
    pub fn check(&self, covenant: Covenant) -> Option<&CovenantCheck> {
        self.checks.iter().find(|c| c.covenant == covenant)
    }
}

fn ratio(numerator: Money, denominator: Money) -> Option<Decimal> {
    if denominator.is_positive() {
        numerator.ratio_to(denominator).map(|r| r.round_dp(4))
    } else {
        None
    }
}

fn evaluate(
    covenant: Covenant,
    ratio: Option<Decimal>,
    threshold: Decimal,
    bound: Bound,
) -> CovenantCheck {
    let value = ratio.unwrap_or(Decimal::ZERO);
    let compliant = match bound {
        Bound::Maximum => value <= threshold,
        Bound::Minimum => value >= threshold,
    };
    let headroom = ratio.map(|v| match bound {
        Bound::Maximum => threshold - v,
        Bound::Minimum => v - threshold,
    });
    CovenantCheck {
        covenant,
        value,
        defined: ratio.is_some(),
        threshold,
        bound,
        compliant,
        headroom,
    }
}

/// Tests the covenants.
///
/// # Errors
///
/// Returns an error if debt, current assets or current liabilities are
/// negative. EBITDA and net worth may be negative.
///
/// # Example
///
/// ```rust
/// use debtkit_analytics::covenants::{track_covenants, Covenant, CovenantInput};
/// use debtkit_analytics::policy::CovenantThresholds;
/// use debtkit_core::Money;
/// use rust_decimal_macros::dec;
///
/// let input = CovenantInput {
///     total_debt: Money::new(dec!(900000)),
///     ebitda: Money::new(dec!(400000)),
///     current_assets: Money::new(dec!(600000)),
///     current_liabilities: Money::new(dec!(400000)),
///     net_worth: Money::new(dec!(500000)),
/// };
/// let report = track_covenants(&input, &CovenantThresholds::default()).unwrap();
/// assert!(report.overall_compliant);
/// assert_eq!(report.check(Covenant::DebtToEbitda).unwrap().value, dec!(2.25));
/// ```
pub fn track_covenants(
    input: &CovenantInput,
    thresholds: &CovenantThresholds,
) -> AnalyticsResult<CovenantReport> {
    input.total_debt.validate_non_negative("total_debt")?;
    input.current_assets.validate_non_negative("current_assets")?;
    input
        .current_liabilities
        .validate_non_negative("current_liabilities")?;

    let checks = vec![
        evaluate(
            Covenant::DebtToEbitda,
            ratio(input.total_debt, input.ebitda),
            thresholds.max_debt_to_ebitda,
            Bound::Maximum,
        ),
        evaluate(
            Covenant::CurrentRatio,
            ratio(input.current_assets, input.current_liabilities),
            thresholds.min_current_ratio,
            Bound::Minimum,
        ),
        evaluate(
            Covenant::DebtToEquity,
            ratio(input.total_debt, input.net_worth),
            thresholds.max_debt_to_equity,
            Bound::Maximum,
        ),
    ];

    let breaches = checks.iter().filter(|c| !c.compliant).count();
    if breaches > 0 {
        log::info!("{breaches} covenant breach(es) detected");
    }

    Ok(CovenantReport {
        overall_compliant: breaches == 0,
        breaches,
        checks,
    })
}
