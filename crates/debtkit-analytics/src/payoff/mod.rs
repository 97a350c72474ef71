//! Debt payoff planning.
//!
//! Debts are prioritised by descending interest rate and retired with the
//! snowball method: minimums on everything, every spare unit of budget on the
//! top-priority debt.

pub mod estimate;
pub mod snowball;

pub use estimate::{prioritize_debts, Debt, PrioritizedDebt};
pub use snowball::{plan_snowball, DebtPayoff, SnowballInput, SnowballMonth, SnowballPlan};
