//! Trend insights over calculation history.
//!
//! Insights compare the newest three calculations of a kind against the three
//! before them. Each window must hold at least two calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use debtkit_core::{CalculationKind, Currency, Money};

use crate::record::{Calculation, CalculationRecord};

const WINDOW: usize = 3;
const MIN_WINDOW: usize = 2;
const DEBT_CHANGE_PCT: Decimal = dec!(10);
const RATE_CHANGE_POINTS: Decimal = dec!(0.5);

/// Urgency of an insight. Orders from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Needs attention
    High,
    /// Worth knowing
    Medium,
    /// Informational
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

/// What an insight is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Existing debt across debt brake runs
    DebtTrend,
    /// Interest rates across cost analyses
    InterestTrend,
    /// Latest loan against latest debt capacity
    CapacityWarning,
}

/// A finding derived from calculation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// What the insight is about
    pub kind: InsightKind,
    /// Urgency
    pub priority: Priority,
    /// Short headline
    pub title: String,
    /// What was observed
    pub message: String,
    /// Suggested next step
    pub recommendation: String,
}

fn split_windows(values: &[Decimal]) -> Option<(Decimal, Decimal)> {
    let recent_start = values.len().saturating_sub(WINDOW);
    let older_start = recent_start.saturating_sub(WINDOW);
    let recent = &values[recent_start..];
    let older = &values[older_start..recent_start];

    if recent.len() < MIN_WINDOW || older.len() < MIN_WINDOW {
        return None;
    }
    Some((average(older), average(recent)))
}

fn average(values: &[Decimal]) -> Decimal {
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}

fn debt_trend(records: &[&CalculationRecord]) -> Option<Insight> {
    let debts: Vec<Decimal> = records
        .iter()
        .filter_map(|r| match &r.calculation {
            Calculation::DebtBrake { input, .. } => Some(input.existing_debt.amount()),
            _ => None,
        })
        .collect();

    let (older, recent) = split_windows(&debts)?;
    if older <= Decimal::ZERO {
        return None;
    }
    let change = (recent - older) / older * Decimal::ONE_HUNDRED;
    if change.abs() <= DEBT_CHANGE_PCT {
        return None;
    }

    let rising = change > Decimal::ZERO;
    Some(Insight {
        kind: InsightKind::DebtTrend,
        priority: if rising { Priority::High } else { Priority::Medium },
        title: if rising {
            "Debt Level Increasing"
        } else {
            "Debt Level Decreasing"
        }
        .into(),
        message: format!(
            "Your debt level has {} by {:.1}% in recent calculations.",
            if rising { "increased" } else { "decreased" },
            change.abs()
        ),
        recommendation: if rising {
            "Consider reviewing your spending and increasing debt payments."
        } else {
            "Continue your debt reduction strategy."
        }
        .into(),
    })
}

fn interest_trend(records: &[&CalculationRecord]) -> Option<Insight> {
    let rates: Vec<Decimal> = records
        .iter()
        .filter_map(|r| match &r.calculation {
            Calculation::CostAnalysis { input, .. } => Some(input.interest_rate.value()),
            _ => None,
        })
        .collect();

    let (older, recent) = split_windows(&rates)?;
    let change = recent - older;
    if change.abs() <= RATE_CHANGE_POINTS {
        return None;
    }

    let rising = change > Decimal::ZERO;
    Some(Insight {
        kind: InsightKind::InterestTrend,
        priority: if rising { Priority::High } else { Priority::Low },
        title: if rising {
            "Interest Rates Rising"
        } else {
            "Interest Rates Falling"
        }
        .into(),
        message: format!(
            "Average interest rates in your calculations have {} by {:.2} percentage points.",
            if rising { "increased" } else { "decreased" },
            change.abs()
        ),
        recommendation: if rising {
            "Consider locking in rates or refinancing existing debt."
        } else {
            "Good time to consider new financing at lower rates."
        }
        .into(),
    })
}

fn capacity_warning(records: &[&CalculationRecord]) -> Option<Insight> {
    let capacity = records.iter().rev().find_map(|r| match &r.calculation {
        Calculation::DebtBrake { result, .. } => Some(result.available_capacity),
        _ => None,
    })?;
    let principal = records.iter().rev().find_map(|r| match &r.calculation {
        Calculation::CostAnalysis { input, .. } => Some(input.principal),
        _ => None,
    })?;

    if principal <= capacity {
        return None;
    }

    let fmt = |m: Money| Currency::default().format(m.amount());
    Some(Insight {
        kind: InsightKind::CapacityWarning,
        priority: Priority::High,
        title: "Loan Exceeds Debt Capacity".into(),
        message: format!(
            "The loan amount ({}) exceeds your available debt capacity ({}).",
            fmt(principal),
            fmt(capacity)
        ),
        recommendation: "Consider reducing the loan amount or improving your financial position first."
            .into(),
    })
}

/// Derives insights from records in chronological order.
///
/// Returns nothing for fewer than two records. The result is sorted by
/// priority, most urgent first.
pub fn generate_insights(records: &[CalculationRecord]) -> Vec<Insight> {
    if records.len() < 2 {
        return Vec::new();
    }

    let relevant: Vec<&CalculationRecord> = records
        .iter()
        .filter(|r| {
            matches!(
                r.kind(),
                CalculationKind::DebtBrake | CalculationKind::CostAnalysis
            )
        })
        .collect();

    let mut insights: Vec<Insight> = [
        debt_trend(&relevant),
        interest_trend(&relevant),
        capacity_warning(&relevant),
    ]
    .into_iter()
    .flatten()
    .collect();

    insights.sort_by_key(|i| i.priority);
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::fixtures::{brake, cost};

    #[test]
    fn test_needs_two_records() {
        assert!(generate_insights(&[cost(dec!(1000000), dec!(5))]).is_empty());
    }

    #[test]
    fn test_debt_increasing() {
        // older window averages 1000, newer 1500
        let records: Vec<_> = [1000, 1000, 1000, 1500, 1500, 1500]
            .into_iter()
            .map(|d| brake(dec!(10000000), Decimal::from(d)))
            .collect();
        let insights = generate_insights(&records);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::DebtTrend);
        assert_eq!(insights[0].priority, Priority::High);
        assert_eq!(insights[0].title, "Debt Level Increasing");
        assert!(insights[0].message.contains("50.0%"));
    }

    #[test]
    fn test_debt_decreasing_is_medium() {
        let records: Vec<_> = [2000, 2000, 2000, 1000, 1000, 1000]
            .into_iter()
            .map(|d| brake(dec!(10000000), Decimal::from(d)))
            .collect();
        let insights = generate_insights(&records);
        assert_eq!(insights[0].title, "Debt Level Decreasing");
        assert_eq!(insights[0].priority, Priority::Medium);
    }

    #[test]
    fn test_small_debt_change_ignored() {
        let records: Vec<_> = [1000, 1000, 1000, 1050, 1050, 1050]
            .into_iter()
            .map(|d| brake(dec!(10000000), Decimal::from(d)))
            .collect();
        assert!(generate_insights(&records).is_empty());
    }

    #[test]
    fn test_short_window_is_ignored() {
        // four records leave only one in the older window
        let records: Vec<_> = [1000, 1000, 5000, 5000]
            .into_iter()
            .map(|d| brake(dec!(10000000), Decimal::from(d)))
            .collect();
        assert!(generate_insights(&records).is_empty());
    }

    #[test]
    fn test_zero_older_average_ignored() {
        let records: Vec<_> = [0, 0, 5000, 5000, 5000]
            .into_iter()
            .map(|d| brake(dec!(10000000), Decimal::from(d)))
            .collect();
        assert!(generate_insights(&records).is_empty());
    }

    #[test]
    fn test_interest_trend() {
        let rising: Vec<_> = [dec!(3), dec!(3), dec!(4), dec!(4), dec!(4)]
            .into_iter()
            .map(|r| cost(dec!(1000), r))
            .collect();
        let insights = generate_insights(&rising);
        assert_eq!(insights[0].title, "Interest Rates Rising");
        assert_eq!(insights[0].priority, Priority::High);

        let falling: Vec<_> = [dec!(6), dec!(6), dec!(5), dec!(5), dec!(5)]
            .into_iter()
            .map(|r| cost(dec!(1000), r))
            .collect();
        let insights = generate_insights(&falling);
        assert_eq!(insights[0].title, "Interest Rates Falling");
        assert_eq!(insights[0].priority, Priority::Low);

        let flat: Vec<_> = [dec!(5), dec!(5), dec!(5.4), dec!(5.4), dec!(5.4)]
            .into_iter()
            .map(|r| cost(dec!(1000), r))
            .collect();
        assert!(generate_insights(&flat).is_empty());
    }

    #[test]
    fn test_capacity_warning_uses_latest_records() {
        // limit 3500 on 1M revenue
        let records = vec![
            cost(dec!(100000), dec!(5)),
            brake(dec!(1000000), dec!(0)),
            cost(dec!(3000), dec!(5)),
        ];
        assert!(generate_insights(&records).is_empty());

        let records = vec![
            cost(dec!(3000), dec!(5)),
            brake(dec!(1000000), dec!(0)),
            cost(dec!(100000), dec!(5)),
        ];
        let insights = generate_insights(&records);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::CapacityWarning);
        assert!(insights[0].message.contains("€100,000.00"));
    }

    #[test]
    fn test_sorted_by_priority() {
        let mut records: Vec<_> = [dec!(6), dec!(6), dec!(5), dec!(5)]
            .into_iter()
            .map(|r| cost(dec!(100), r))
            .collect();
        // capacity 0 on a fully used brake
        records.push(brake(dec!(1000000), dec!(10000)));
        records.push(cost(dec!(100), dec!(5)));

        let insights = generate_insights(&records);
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].priority, Priority::High);
        assert_eq!(insights[1].priority, Priority::Low);
    }
}
