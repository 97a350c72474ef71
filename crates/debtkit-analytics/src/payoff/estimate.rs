//! Debt prioritisation and standalone payoff estimates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use debtkit_core::{Money, Percent};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::loans::payoff_periods;

/// A single debt entered into the payoff planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Label shown in plans and tables
    pub name: String,
    /// Outstanding balance
    pub balance: Money,
    /// Annual interest rate
    pub interest_rate: Percent,
    /// Contractual monthly minimum
    #[serde(default)]
    pub minimum_payment: Money,
}

impl Debt {
    /// Creates a debt with no minimum payment.
    pub fn new(name: impl Into<String>, balance: Money, interest_rate: Percent) -> Self {
        Self {
            name: name.into(),
            balance,
            interest_rate,
            minimum_payment: Money::ZERO,
        }
    }

    /// Sets the monthly minimum payment.
    #[must_use]
    pub fn with_minimum(mut self, minimum_payment: Money) -> Self {
        self.minimum_payment = minimum_payment;
        self
    }

    /// Monthly interest rate as a fraction.
    #[must_use]
    pub fn monthly_rate(&self) -> Decimal {
        self.interest_rate.per_period(12)
    }

    pub(crate) fn validate(&self) -> AnalyticsResult<()> {
        if self.name.trim().is_empty() {
            return Err(AnalyticsError::InvalidInput("debt name must not be empty".into()));
        }
        self.balance.validate_positive(&format!("{}.balance", self.name))?;
        self.interest_rate
            .validate(&format!("{}.interest_rate", self.name))?;
        self.minimum_payment
            .validate_non_negative(&format!("{}.minimum_payment", self.name))?;
        Ok(())
    }
}

/// A debt with its payoff priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedDebt {
    /// 1 is paid first
    pub priority: u32,
    /// Debt label
    pub name: String,
    /// Outstanding balance
    pub balance: Money,
    /// Annual interest rate
    pub interest_rate: Percent,
    /// Monthly minimum
    pub minimum_payment: Money,
    /// Months to retire the debt on its minimum alone, if it ever retires
    pub payoff_months: Option<Decimal>,
}

/// Orders debts by descending interest rate.
///
/// Debts with equal rates keep their input order.
///
/// # Errors
///
/// Returns an error if the list is empty or a debt is invalid.
pub fn prioritize_debts(debts: &[Debt]) -> AnalyticsResult<Vec<PrioritizedDebt>> {
    if debts.is_empty() {
        return Err(AnalyticsError::InvalidInput("at least one debt is required".into()));
    }
    for debt in debts {
        debt.validate()?;
    }

    let mut ordered: Vec<&Debt> = debts.iter().collect();
    ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));

    Ok(ordered
        .into_iter()
        .zip(1u32..)
        .map(|(debt, priority)| {
            let payoff_months =
                payoff_periods(debt.balance, debt.monthly_rate(), debt.minimum_payment)
                    .ok()
                    .map(|m| m.round_dp(1));
            PrioritizedDebt {
                priority,
                name: debt.name.clone(),
                balance: debt.balance,
                interest_rate: debt.interest_rate,
                minimum_payment: debt.minimum_payment,
                payoff_months,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn debt(name: &str, balance: Decimal, rate: Decimal, min: Decimal) -> Debt {
        Debt::new(name, Money::new(balance), Percent::new(rate)).with_minimum(Money::new(min))
    }

    #[test]
    fn test_orders_by_descending_rate() {
        let debts = vec![
            debt("Equipment", dec!(20000), dec!(4.5), dec!(400)),
            debt("Credit line", dec!(5000), dec!(12.9), dec!(150)),
            debt("Vehicle", dec!(15000), dec!(6.0), dec!(350)),
        ];
        let ordered = prioritize_debts(&debts).unwrap();

        let names: Vec<_> = ordered.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Credit line", "Vehicle", "Equipment"]);
        assert_eq!(ordered[0].priority, 1);
        assert_eq!(ordered[2].priority, 3);
    }

    #[test]
    fn test_equal_rates_keep_input_order() {
        let debts = vec![
            debt("A", dec!(1000), dec!(5), dec!(50)),
            debt("B", dec!(2000), dec!(5), dec!(50)),
            debt("C", dec!(3000), dec!(7), dec!(50)),
        ];
        let ordered = prioritize_debts(&debts).unwrap();
        let names: Vec<_> = ordered.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn test_payoff_estimate() {
        let debts = vec![
            debt("Interest free", dec!(1200), dec!(0), dec!(100)),
            debt("Stuck", dec!(10000), dec!(12), dec!(100)),
            debt("No minimum", dec!(500), dec!(3), dec!(0)),
        ];
        let ordered = prioritize_debts(&debts).unwrap();

        let stuck = ordered.iter().find(|d| d.name == "Stuck").unwrap();
        // 1% of 10000 is exactly the minimum
        assert_eq!(stuck.payoff_months, None);

        let free = ordered.iter().find(|d| d.name == "Interest free").unwrap();
        assert_eq!(free.payoff_months, Some(dec!(12)));

        let none = ordered.iter().find(|d| d.name == "No minimum").unwrap();
        assert_eq!(none.payoff_months, None);
    }

    #[test]
    fn test_rejects_invalid_debts() {
        assert!(prioritize_debts(&[]).is_err());
        assert!(prioritize_debts(&[debt("", dec!(100), dec!(5), dec!(10))]).is_err());
        assert!(prioritize_debts(&[debt("Zero", dec!(0), dec!(5), dec!(10))]).is_err());
        assert!(prioritize_debts(&[debt("Rate", dec!(100), dec!(-1), dec!(10))]).is_err());
    }
}
