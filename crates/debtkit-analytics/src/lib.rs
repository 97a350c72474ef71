//! # Debtkit Analytics
//!
//! Calculators for SME debt management.
//!
//! - **Debt brake**: revenue-proportional debt ceiling and debt service capacity
//! - **Loans**: annuity payments, amortization schedules, full cost analysis
//! - **Payoff**: debt prioritisation and snowball payoff simulation
//! - **Covenants**: leverage, liquidity and gearing covenant checks
//! - **Equity swap**: debt-to-equity conversion analysis
//! - **Funding**: public funding programme guidance
//!
//! Every calculator is a pure function of its input and, where thresholds
//! apply, a section of [`policy::DebtPolicy`].
//!
//! ## Usage
//!
//! ```rust
//! use debtkit_analytics::prelude::*;
//! use debtkit_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let policy = DebtPolicy::default();
//! let input = DebtBrakeInput::new(Money::new(dec!(2000000)));
//! let brake = calculate_debt_brake(&input, &policy.debt_brake).unwrap();
//! assert_eq!(brake.debt_limit.amount(), dec!(7000));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod policy;

pub mod covenants;
pub mod debt_brake;
pub mod equity_swap;
pub mod funding;
pub mod loans;
pub mod payoff;

pub use error::{AnalyticsError, AnalyticsResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::covenants::{
        track_covenants, Bound, Covenant, CovenantCheck, CovenantInput, CovenantReport,
    };
    pub use crate::debt_brake::{
        calculate_debt_brake, DebtBrakeInput, DebtBrakeResult, DebtBrakeStatus,
    };
    pub use crate::equity_swap::{analyze_equity_swap, EquitySwapInput, EquitySwapResult};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::funding::{
        recommend_funding, CompanySize, FundingCatalog, FundingGuidance, FundingProgram,
        FundingRequest,
    };
    pub use crate::loans::{
        amortization_schedule, analyze_loan_cost, annuity_payment, cost_schedule,
        payoff_periods, yearly_summary, CostAnalysisInput, CostAnalysisResult, YearlySummary,
    };
    pub use crate::payoff::{
        plan_snowball, prioritize_debts, Debt, DebtPayoff, PrioritizedDebt, SnowballInput,
        SnowballMonth, SnowballPlan,
    };
    pub use crate::policy::{CovenantThresholds, DebtBrakePolicy, DebtPolicy, PayoffPolicy};
}
