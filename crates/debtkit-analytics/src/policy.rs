//! Tunable thresholds used by the calculators.
//!
//! Every calculator that compares against a limit takes its limit from a
//! [`DebtPolicy`]. The defaults reproduce the conventions typical for German
//! SMEs; deployments override them through the `[policy]` table of the server
//! configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use debtkit_core::{DebtkitError, DebtkitResult};

/// Debt brake parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtBrakePolicy {
    /// Debt ceiling as a fraction of annual revenue (0.0035 = 0.35%).
    pub limit_ratio: Decimal,
    /// Usage percentage above which the status becomes "approaching limit".
    pub warning_usage_pct: Decimal,
    /// Share of net income available for debt service when none is given.
    pub default_service_ratio: Decimal,
}

impl Default for DebtBrakePolicy {
    fn default() -> Self {
        Self {
            limit_ratio: dec!(0.0035),
            warning_usage_pct: dec!(80),
            default_service_ratio: dec!(0.30),
        }
    }
}

/// Covenant limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CovenantThresholds {
    /// Maximum total debt / EBITDA.
    pub max_debt_to_ebitda: Decimal,
    /// Minimum current assets / current liabilities.
    pub min_current_ratio: Decimal,
    /// Maximum total debt / net worth.
    pub max_debt_to_equity: Decimal,
}

impl Default for CovenantThresholds {
    fn default() -> Self {
        Self {
            max_debt_to_ebitda: dec!(3.0),
            min_current_ratio: dec!(1.2),
            max_debt_to_equity: dec!(2.0),
        }
    }
}

/// Payoff simulation limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffPolicy {
    /// Longest plan the snowball simulation will produce.
    pub max_months: u32,
}

impl Default for PayoffPolicy {
    fn default() -> Self {
        Self { max_months: 1200 }
    }
}

/// All calculator thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtPolicy {
    /// Debt brake parameters.
    pub debt_brake: DebtBrakePolicy,
    /// Covenant limits.
    pub covenants: CovenantThresholds,
    /// Payoff simulation limits.
    pub payoff: PayoffPolicy,
}

impl DebtPolicy {
    /// Checks that every threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns `DebtkitError::ConfigError` naming the first bad value.
    pub fn validate(&self) -> DebtkitResult<()> {
        let brake = &self.debt_brake;
        if brake.limit_ratio <= Decimal::ZERO || brake.limit_ratio > Decimal::ONE {
            return Err(DebtkitError::config_error(format!(
                "debt_brake.limit_ratio must be in (0, 1], got {}",
                brake.limit_ratio
            )));
        }
        if brake.warning_usage_pct <= Decimal::ZERO || brake.warning_usage_pct > Decimal::ONE_HUNDRED
        {
            return Err(DebtkitError::config_error(format!(
                "debt_brake.warning_usage_pct must be in (0, 100], got {}",
                brake.warning_usage_pct
            )));
        }
        if brake.default_service_ratio < Decimal::ZERO || brake.default_service_ratio > Decimal::ONE
        {
            return Err(DebtkitError::config_error(format!(
                "debt_brake.default_service_ratio must be in [0, 1], got {}",
                brake.default_service_ratio
            )));
        }

        let cov = &self.covenants;
        for (name, value) in [
            ("max_debt_to_ebitda", cov.max_debt_to_ebitda),
            ("min_current_ratio", cov.min_current_ratio),
            ("max_debt_to_equity", cov.max_debt_to_equity),
        ] {
            if value <= Decimal::ZERO {
                return Err(DebtkitError::config_error(format!(
                    "covenants.{name} must be positive, got {value}"
                )));
            }
        }

        if self.payoff.max_months == 0 {
            return Err(DebtkitError::config_error("payoff.max_months must be at least 1"));
        }
        Ok(())
    }
}
