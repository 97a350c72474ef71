//! Month-by-month snowball payoff simulation.
//!
//! Each month every open balance accrues interest, every debt receives its
//! minimum payment, and whatever is left of the budget goes to the open debt
//! with the highest priority. A retired debt's minimum stays in the budget and
//! rolls onto the next debt.

use serde::{Deserialize, Serialize};

use debtkit_core::{Money, Percent};

use super::estimate::{prioritize_debts, Debt, PrioritizedDebt};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::policy::PayoffPolicy;

/// Inputs for a snowball plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowballInput {
    /// Debts to retire
    pub debts: Vec<Debt>,
    /// Total amount available for debt payments each month
    pub monthly_budget: Money,
}

/// Payoff outcome for one debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoff {
    /// 1 is paid first
    pub priority: u32,
    /// Debt label
    pub name: String,
    /// Balance at the start of the plan
    pub starting_balance: Money,
    /// Annual interest rate
    pub interest_rate: Percent,
    /// Monthly minimum
    pub minimum_payment: Money,
    /// Month in which the balance reached zero
    pub payoff_month: u32,
    /// Interest accrued until payoff
    pub interest_paid: Money,
    /// Everything paid towards the debt
    pub total_paid: Money,
}

/// One month of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnowballMonth {
    /// Month number, starting at 1
    pub month: u32,
    /// Amount paid across all debts
    pub payment: Money,
    /// Interest accrued across all debts
    pub interest: Money,
    /// Total balance left after the payment
    pub remaining_balance: Money,
}

/// A complete snowball plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowballPlan {
    /// Budget the plan was built for
    pub monthly_budget: Money,
    /// Months until every debt is retired
    pub months_to_debt_free: u32,
    /// Interest paid across all debts
    pub total_interest: Money,
    /// Principal plus interest paid
    pub total_paid: Money,
    /// Interest avoided compared with paying only the minimums; `None` when
    /// the minimums alone never retire every debt
    pub interest_saved: Option<Money>,
    /// Debts in payoff order
    pub debts: Vec<DebtPayoff>,
    /// Month-by-month progress
    pub timeline: Vec<SnowballMonth>,
}

struct Account<'a> {
    debt: &'a PrioritizedDebt,
    balance: Money,
    interest_paid: Money,
    paid: Money,
    payoff_month: Option<u32>,
}

impl Account<'_> {
    fn is_open(&self) -> bool {
        self.balance.is_positive()
    }

    fn accrue(&mut self) -> Money {
        let interest = (self.balance * self.debt.interest_rate.per_period(12)).round_cents();
        self.balance += interest;
        self.interest_paid += interest;
        interest
    }

    fn pay(&mut self, amount: Money, month: u32) {
        self.balance -= amount;
        self.paid += amount;
        if !self.is_open() && self.payoff_month.is_none() {
            self.payoff_month = Some(month);
        }
    }
}

/// Builds a snowball payoff plan.
///
/// # Errors
///
/// * `InvalidInput` if the debts are invalid, the budget is not positive, or
///   the budget does not cover the sum of minimum payments.
/// * `NeverPaysOff` if the total balance does not decline in the first month.
/// * `HorizonExceeded` if the plan runs past `policy.max_months`.
///
/// # Example
///
/// ```rust
/// use debtkit_analytics::payoff::{plan_snowball, Debt, SnowballInput};
/// use debtkit_analytics::policy::PayoffPolicy;
/// use debtkit_core::{Money, Percent};
/// use rust_decimal_macros::dec;
///
/// let input = SnowballInput {
///     debts: vec![
///         Debt::new("Overdraft", Money::new(dec!(2000)), Percent::new(dec!(11))),
///         Debt::new("Vehicle", Money::new(dec!(8000)), Percent::new(dec!(5))),
///     ],
///     monthly_budget: Money::new(dec!(500)),
/// };
/// let plan = plan_snowball(&input, &PayoffPolicy::default()).unwrap();
/// assert_eq!(plan.debts[0].name, "Overdraft");
/// assert!(plan.months_to_debt_free > 20);
/// ```
pub fn plan_snowball(input: &SnowballInput, policy: &PayoffPolicy) -> AnalyticsResult<SnowballPlan> {
    let ordered = prioritize_debts(&input.debts)?;
    input.monthly_budget.validate_positive("monthly_budget")?;

    let minimums: Money = ordered.iter().map(|d| d.minimum_payment).sum();
    if input.monthly_budget < minimums {
        return Err(AnalyticsError::InvalidInput(format!(
            "monthly budget {} is below the sum of minimum payments {}",
            input.monthly_budget, minimums
        )));
    }

    let mut accounts: Vec<Account<'_>> = ordered
        .iter()
        .map(|debt| Account {
            debt,
            balance: debt.balance,
            interest_paid: Money::ZERO,
            paid: Money::ZERO,
            payoff_month: None,
        })
        .collect();

    let starting_total: Money = accounts.iter().map(|a| a.balance).sum();
    let mut timeline = Vec::new();
    let mut month = 0u32;

    while accounts.iter().any(Account::is_open) {
        month += 1;
        if month > policy.max_months {
            return Err(AnalyticsError::HorizonExceeded {
                max_months: policy.max_months,
            });
        }

        let interest: Money = accounts
            .iter_mut()
            .filter(|a| a.is_open())
            .map(Account::accrue)
            .sum();

        let mut pool = input.monthly_budget;
        for account in accounts.iter_mut().filter(|a| a.is_open()) {
            let amount = account.debt.minimum_payment.min(account.balance).min(pool);
            account.pay(amount, month);
            pool -= amount;
        }
        for account in accounts.iter_mut().filter(|a| a.is_open()) {
            if !pool.is_positive() {
                break;
            }
            let amount = pool.min(account.balance);
            account.pay(amount, month);
            pool -= amount;
        }

        let remaining: Money = accounts.iter().map(|a| a.balance).sum();
        if month == 1 && remaining >= starting_total {
            return Err(AnalyticsError::NeverPaysOff(format!(
                "a monthly budget of {} does not cover the {} of interest accruing",
                input.monthly_budget, interest
            )));
        }

        timeline.push(SnowballMonth {
            month,
            payment: input.monthly_budget - pool,
            interest,
            remaining_balance: remaining,
        });
    }

    let total_interest: Money = accounts.iter().map(|a| a.interest_paid).sum();
    let total_paid: Money = accounts.iter().map(|a| a.paid).sum();
    let interest_saved = minimum_only_interest(&ordered, policy)
        .map(|baseline| (baseline - total_interest).round_cents());

    log::debug!(
        "snowball: {} debts, budget {}, debt free after {} months",
        accounts.len(),
        input.monthly_budget,
        month
    );

    let debts = accounts
        .iter()
        .map(|a| DebtPayoff {
            priority: a.debt.priority,
            name: a.debt.name.clone(),
            starting_balance: a.debt.balance,
            interest_rate: a.debt.interest_rate,
            minimum_payment: a.debt.minimum_payment,
            payoff_month: a.payoff_month.unwrap_or(month),
            interest_paid: a.interest_paid.round_cents(),
            total_paid: a.paid.round_cents(),
        })
        .collect();

    Ok(SnowballPlan {
        monthly_budget: input.monthly_budget,
        months_to_debt_free: month,
        total_interest: total_interest.round_cents(),
        total_paid: total_paid.round_cents(),
        interest_saved,
        debts,
        timeline,
    })
}

/// Interest paid when every debt receives only its own minimum.
fn minimum_only_interest(debts: &[PrioritizedDebt], policy: &PayoffPolicy) -> Option<Money> {
    debts.iter().try_fold(Money::ZERO, |total, debt| {
        let rate = debt.interest_rate.per_period(12);
        let mut balance = debt.balance;
        let mut interest = Money::ZERO;

        for _ in 0..policy.max_months {
            let accrued = (balance * rate).round_cents();
            let next = balance + accrued - debt.minimum_payment.min(balance + accrued);
            if next >= balance {
                return None;
            }
            interest += accrued;
            balance = next;
            if !balance.is_positive() {
                return Some(total + interest);
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn debt(name: &str, balance: Decimal, rate: Decimal, min: Decimal) -> Debt {
        Debt::new(name, Money::new(balance), Percent::new(rate)).with_minimum(Money::new(min))
    }

    fn plan(debts: Vec<Debt>, budget: Decimal) -> AnalyticsResult<SnowballPlan> {
        let input = SnowballInput {
            debts,
            monthly_budget: Money::new(budget),
        };
        plan_snowball(&input, &PayoffPolicy::default())
    }

    #[test]
    fn test_single_debt() {
        let result = plan(vec![debt("Loan", dec!(1000), dec!(12), dec!(100))], dec!(100)).unwrap();

        assert_eq!(result.months_to_debt_free, 11);
        assert_eq!(result.timeline.len(), 11);
        // first month: 10.00 interest, 90.00 principal
        assert_eq!(result.timeline[0].interest.amount(), dec!(10));
        assert_eq!(result.timeline[0].remaining_balance.amount(), dec!(910));
        assert_eq!(
            result.total_paid,
            Money::new(dec!(1000)) + result.total_interest
        );
        // budget equals the minimum: nothing saved
        assert_eq!(result.interest_saved, Some(Money::ZERO));
    }

    #[test]
    fn test_highest_rate_retired_first() {
        let result = plan(
            vec![
                debt("Equipment", dec!(10000), dec!(4), dec!(200)),
                debt("Credit card", dec!(3000), dec!(18), dec!(90)),
            ],
            dec!(800),
        )
        .unwrap();

        assert_eq!(result.debts[0].name, "Credit card");
        assert_eq!(result.debts[0].priority, 1);
        assert!(result.debts[0].payoff_month < result.debts[1].payoff_month);
        assert_eq!(result.debts[1].payoff_month, result.months_to_debt_free);

        let saved = result.interest_saved.unwrap();
        assert!(saved.is_positive(), "saved {saved}");
    }

    #[test]
    fn test_minimums_roll_over() {
        let result = plan(
            vec![
                debt("Small", dec!(300), dec!(10), dec!(100)),
                debt("Large", dec!(5000), dec!(5), dec!(100)),
            ],
            dec!(200),
        )
        .unwrap();

        let small_done = result.debts[0].payoff_month;
        let after = &result.timeline[small_done as usize];
        // the full budget keeps flowing once the first debt is gone
        assert_eq!(after.payment.amount(), dec!(200));
    }

    #[test]
    fn test_last_month_pays_only_what_is_owed() {
        let result = plan(vec![debt("Loan", dec!(250), dec!(0), dec!(0))], dec!(100)).unwrap();
        assert_eq!(result.months_to_debt_free, 3);
        assert_eq!(result.timeline[2].payment.amount(), dec!(50));
        assert_eq!(result.total_interest, Money::ZERO);
        // no minimum: the minimums alone never finish the job
        assert_eq!(result.interest_saved, None);
    }

    #[test]
    fn test_budget_below_minimums() {
        let err = plan(
            vec![
                debt("A", dec!(1000), dec!(5), dec!(100)),
                debt("B", dec!(1000), dec!(5), dec!(100)),
            ],
            dec!(150),
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }

    #[test]
    fn test_budget_below_interest_never_pays_off() {
        // 100k at 24% accrues 2000 in the first month
        let err = plan(vec![debt("Loan", dec!(100000), dec!(24), dec!(0))], dec!(1000)).unwrap_err();
        assert!(matches!(err, AnalyticsError::NeverPaysOff(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_horizon() {
        let input = SnowballInput {
            debts: vec![debt("Loan", dec!(1000), dec!(0), dec!(0))],
            monthly_budget: Money::new(dec!(10)),
        };
        let err = plan_snowball(&input, &PayoffPolicy { max_months: 12 }).unwrap_err();
        assert_eq!(err, AnalyticsError::HorizonExceeded { max_months: 12 });
    }

    #[test]
    fn test_rejects_zero_budget() {
        assert!(plan(vec![debt("Loan", dec!(1000), dec!(5), dec!(0))], dec!(0)).is_err());
    }

    proptest! {
        #[test]
        fn prop_paid_equals_balance_plus_interest(
            balances in proptest::collection::vec(100u32..50_000, 1..5),
            rates in proptest::collection::vec(0u32..2_500, 5),
            budget in 1_000u32..5_000,
        ) {
            let debts: Vec<Debt> = balances
                .iter()
                .zip(&rates)
                .enumerate()
                .map(|(i, (b, r))| debt(
                    &format!("D{i}"),
                    Decimal::from(*b),
                    Decimal::new(i64::from(*r), 2),
                    Decimal::ZERO,
                ))
                .collect();
            let start: Money = debts.iter().map(|d| d.balance).sum();

            if let Ok(result) = plan(debts, Decimal::from(budget)) {
                prop_assert_eq!(result.total_paid, start + result.total_interest);
                prop_assert_eq!(result.timeline.last().unwrap().remaining_balance, Money::ZERO);
                let mut previous = start;
                for month in &result.timeline {
                    prop_assert!(month.remaining_balance <= previous);
                    previous = month.remaining_balance;
                }
            }
        }
    }
}
