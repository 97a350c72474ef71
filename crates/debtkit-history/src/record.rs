//! Calculation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use debtkit_analytics::covenants::{CovenantInput, CovenantReport};
use debtkit_analytics::debt_brake::{DebtBrakeInput, DebtBrakeResult};
use debtkit_analytics::equity_swap::{EquitySwapInput, EquitySwapResult};
use debtkit_analytics::funding::{FundingGuidance, FundingRequest};
use debtkit_analytics::loans::{CostAnalysisInput, CostAnalysisResult};
use debtkit_analytics::payoff::{SnowballInput, SnowballPlan};
use debtkit_core::CalculationKind;

/// A calculation with its inputs and outcome, tagged by calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Calculation {
    /// Debt brake run
    DebtBrake {
        /// Inputs
        input: DebtBrakeInput,
        /// Outcome
        result: DebtBrakeResult,
    },
    /// Loan cost analysis
    CostAnalysis {
        /// Inputs
        input: CostAnalysisInput,
        /// Outcome
        result: CostAnalysisResult,
    },
    /// Snowball payoff plan
    DebtSnowball {
        /// Inputs
        input: SnowballInput,
        /// Outcome
        result: SnowballPlan,
    },
    /// Covenant check
    Covenants {
        /// Inputs
        input: CovenantInput,
        /// Outcome
        result: CovenantReport,
    },
    /// Debt-equity swap analysis
    EquitySwap {
        /// Inputs
        input: EquitySwapInput,
        /// Outcome
        result: EquitySwapResult,
    },
    /// Funding programme guidance
    FundingGuidance {
        /// Inputs
        input: FundingRequest,
        /// Outcome
        result: FundingGuidance,
    },
}

impl Calculation {
    /// The calculator that produced this calculation.
    #[must_use]
    pub fn kind(&self) -> CalculationKind {
        match self {
            Calculation::DebtBrake { .. } => CalculationKind::DebtBrake,
            Calculation::CostAnalysis { .. } => CalculationKind::CostAnalysis,
            Calculation::DebtSnowball { .. } => CalculationKind::DebtSnowball,
            Calculation::Covenants { .. } => CalculationKind::Covenants,
            Calculation::EquitySwap { .. } => CalculationKind::EquitySwap,
            Calculation::FundingGuidance { .. } => CalculationKind::FundingGuidance,
        }
    }
}

/// A calculation filed in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Unique identifier
    pub id: Uuid,
    /// When the calculation ran
    pub timestamp: DateTime<Utc>,
    /// Client session that ran it, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// The calculation itself
    pub calculation: Calculation,
}

impl CalculationRecord {
    /// Creates a record stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(calculation: Calculation) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            session_id: None,
            calculation,
        }
    }

    /// Attaches a session id.
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// The calculator that produced the record.
    #[must_use]
    pub fn kind(&self) -> CalculationKind {
        self.calculation.kind()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use debtkit_analytics::debt_brake::calculate_debt_brake;
    use debtkit_analytics::loans::analyze_loan_cost;
    use debtkit_analytics::policy::DebtBrakePolicy;
    use debtkit_core::{Money, Percent};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    pub fn brake(revenue: Decimal, existing_debt: Decimal) -> CalculationRecord {
        let input = DebtBrakeInput::new(Money::new(revenue)).with_existing_debt(Money::new(existing_debt));
        let result = calculate_debt_brake(&input, &DebtBrakePolicy::default()).unwrap();
        CalculationRecord::new(Calculation::DebtBrake { input, result })
    }

    pub fn cost(principal: Decimal, rate: Decimal) -> CalculationRecord {
        let input = CostAnalysisInput::new(Money::new(principal), Percent::new(rate), dec!(5));
        let result = analyze_loan_cost(&input).unwrap();
        CalculationRecord::new(Calculation::CostAnalysis { input, result })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_tag_in_json() {
        let record = fixtures::brake(dec!(1000000), dec!(1000)).with_session("s-1");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["calculation"]["kind"], "debtBrake");
        assert_eq!(json["session_id"], "s-1");
        assert_eq!(record.kind(), CalculationKind::DebtBrake);
    }

    #[test]
    fn test_json_round_trip_keeps_kind_and_id() {
        let record = fixtures::cost(dec!(50000), dec!(4.5));
        let bytes = serde_json::to_vec(&record).unwrap();
        let back: CalculationRecord = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(back.id, record.id);
        assert_eq!(back.kind(), CalculationKind::CostAnalysis);
        assert_eq!(back.session_id, None);
    }
}
