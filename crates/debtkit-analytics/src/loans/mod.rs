//! Loan mathematics: annuities, amortization schedules and cost analysis.

pub mod amortization;
pub mod annuity;
pub mod cost;

pub use amortization::{amortization_schedule, yearly_summary, YearlySummary};
pub use annuity::{annuity_payment, compound_factor, payoff_periods};
pub use cost::{
    analyze_loan_cost, cost_schedule, CostAnalysisInput, CostAnalysisResult,
    DEFAULT_OPPORTUNITY_RATE, MAX_TERM_YEARS,
};
