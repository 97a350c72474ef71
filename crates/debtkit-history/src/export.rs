//! History export document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::insights::{generate_insights, Insight};
use crate::recommendations::{generate_recommendations, Recommendation};
use crate::record::CalculationRecord;
use crate::summary::HistorySummary;

/// Insights, recommendations and summary derived from one history snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    /// Usage summary
    pub summary: HistorySummary,
    /// Trend insights, most urgent first
    pub insights: Vec<Insight>,
    /// Suggested next steps
    pub recommendations: Vec<Recommendation>,
}

impl HistoryReport {
    /// Analyses records in chronological order.
    pub fn from_records(records: &[CalculationRecord]) -> Self {
        let insights = generate_insights(records);
        let summary = HistorySummary::from_records(records, insights.len());
        let recommendations = generate_recommendations(&summary, &insights);
        Self {
            summary,
            insights,
            recommendations,
        }
    }
}

/// Everything known about past calculations, as one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryExport {
    /// Usage summary
    pub summary: HistorySummary,
    /// Trend insights
    pub insights: Vec<Insight>,
    /// Suggested next steps
    pub recommendations: Vec<Recommendation>,
    /// Every calculation, oldest first
    pub calculations: Vec<CalculationRecord>,
    /// When the export was produced
    pub exported_at: DateTime<Utc>,
}

impl HistoryExport {
    /// Builds an export from records in chronological order.
    pub fn new(records: Vec<CalculationRecord>) -> Self {
        let report = HistoryReport::from_records(&records);
        Self {
            summary: report.summary,
            insights: report.insights,
            recommendations: report.recommendations,
            calculations: records,
            exported_at: Utc::now(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be serialized.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
