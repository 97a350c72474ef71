//! Usage summary over calculation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use debtkit_core::CalculationKind;

use crate::record::CalculationRecord;

/// How the toolkit has been used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of calculations on record
    pub total_calculations: usize,
    /// Calculations per kind; kinds never used are omitted
    pub calculation_types: BTreeMap<CalculationKind, usize>,
    /// Most frequently used calculator
    pub most_used_tool: CalculationKind,
    /// Number of insights currently derived
    pub insights_count: usize,
    /// Timestamp of the newest calculation
    pub last_calculation: Option<DateTime<Utc>>,
}

impl HistorySummary {
    /// Summarises records in chronological order.
    ///
    /// Ties for the most used tool go to the kind listed first in
    /// [`CalculationKind::ALL`]; an empty history reports the debt brake.
    pub fn from_records(records: &[CalculationRecord], insights_count: usize) -> Self {
        let mut calculation_types = BTreeMap::new();
        for record in records {
            *calculation_types.entry(record.kind()).or_insert(0) += 1;
        }

        let mut most_used_tool = CalculationKind::DebtBrake;
        let mut best = 0;
        for kind in CalculationKind::ALL {
            let count = calculation_types.get(&kind).copied().unwrap_or(0);
            if count > best {
                best = count;
                most_used_tool = kind;
            }
        }

        Self {
            total_calculations: records.len(),
            calculation_types,
            most_used_tool,
            insights_count,
            last_calculation: records.last().map(|r| r.timestamp),
        }
    }

    /// Number of calculations of `kind`.
    pub fn count(&self, kind: CalculationKind) -> usize {
        self.calculation_types.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::{brake, cost};
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_history() {
        let summary = HistorySummary::from_records(&[], 0);
        assert_eq!(summary.total_calculations, 0);
        assert_eq!(summary.most_used_tool, CalculationKind::DebtBrake);
        assert_eq!(summary.last_calculation, None);
        assert!(summary.calculation_types.is_empty());
    }

    #[test]
    fn test_counts_and_most_used() {
        let records = vec![
            brake(dec!(1000000), dec!(0)),
            cost(dec!(1000), dec!(5)),
            cost(dec!(2000), dec!(5)),
        ];
        let summary = HistorySummary::from_records(&records, 2);

        assert_eq!(summary.total_calculations, 3);
        assert_eq!(summary.count(CalculationKind::CostAnalysis), 2);
        assert_eq!(summary.count(CalculationKind::Covenants), 0);
        assert_eq!(summary.most_used_tool, CalculationKind::CostAnalysis);
        assert_eq!(summary.insights_count, 2);
        assert_eq!(summary.last_calculation, Some(records[2].timestamp));
    }

    #[test]
    fn test_tie_goes_to_first_kind() {
        let records = vec![cost(dec!(1000), dec!(5)), brake(dec!(1000000), dec!(0))];
        let summary = HistorySummary::from_records(&records, 0);
        assert_eq!(summary.most_used_tool, CalculationKind::DebtBrake);
    }

    #[test]
    fn test_serializes_kind_keys_in_camel_case() {
        let records = vec![brake(dec!(1000000), dec!(0))];
        let json = serde_json::to_value(HistorySummary::from_records(&records, 0)).unwrap();
        assert_eq!(json["calculation_types"]["debtBrake"], 1);
        assert_eq!(json["most_used_tool"], "debtBrake");
    }
}
