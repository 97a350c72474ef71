//! Usage recommendations.

use serde::{Deserialize, Serialize};

use debtkit_core::CalculationKind;

use crate::insights::{Insight, Priority};
use crate::summary::HistorySummary;

/// Below this many calculations the user is nudged to try every tool.
const EXPLORE_THRESHOLD: usize = 3;

/// Why a recommendation was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Based on how little the toolkit has been used
    Usage,
    /// Based on calculators used together
    Integration,
    /// Based on high-priority insights
    Urgent,
}

/// A suggested next step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Why it was made
    pub kind: RecommendationKind,
    /// Short headline
    pub title: String,
    /// Explanation
    pub message: String,
    /// Call to action
    pub action: String,
}

/// Builds recommendations from a summary and the current insights.
pub fn generate_recommendations(
    summary: &HistorySummary,
    insights: &[Insight],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if summary.total_calculations < EXPLORE_THRESHOLD {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Usage,
            title: "Explore All Tools".into(),
            message: "Try all available calculators to get a complete picture of your financial situation."
                .into(),
            action: "Explore tools".into(),
        });
    }

    if summary.count(CalculationKind::DebtBrake) > 0
        && summary.count(CalculationKind::CostAnalysis) > 0
    {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Integration,
            title: "Compare Debt vs. Costs".into(),
            message: "Use both debt brake and cost analysis tools together for comprehensive planning."
                .into(),
            action: "Compare results".into(),
        });
    }

    let high = insights
        .iter()
        .filter(|i| i.priority == Priority::High)
        .count();
    if high > 0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Urgent,
            title: "Address High Priority Issues".into(),
            message: format!("You have {high} high-priority insights that need attention."),
            action: "Review insights".into(),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::generate_insights;
    use crate::record::fixtures::{brake, cost};
    use rust_decimal_macros::dec;

    fn titles(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_new_user_is_told_to_explore() {
        let summary = HistorySummary::from_records(&[], 0);
        assert_eq!(titles(&generate_recommendations(&summary, &[])), ["Explore All Tools"]);
    }

    #[test]
    fn test_all_three() {
        let records = vec![
            brake(dec!(1000000), dec!(0)),
            cost(dec!(100000), dec!(5)),
        ];
        let insights = generate_insights(&records);
        let summary = HistorySummary::from_records(&records, insights.len());
        let recs = generate_recommendations(&summary, &insights);

        assert_eq!(
            titles(&recs),
            ["Explore All Tools", "Compare Debt vs. Costs", "Address High Priority Issues"]
        );
        assert!(recs[2].message.contains("You have 1 high-priority"));
    }

    #[test]
    fn test_experienced_user_without_issues() {
        let records = vec![
            cost(dec!(1000), dec!(5)),
            cost(dec!(1000), dec!(5)),
            cost(dec!(1000), dec!(5)),
        ];
        let summary = HistorySummary::from_records(&records, 0);
        assert!(generate_recommendations(&summary, &[]).is_empty());
    }
}
