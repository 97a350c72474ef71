//! Insights command implementation.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use debtkit_history::{Insight, Priority, Recommendation};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output, print_table, KeyValue};

/// Insight table row.
#[derive(Debug, Serialize, Tabled)]
pub struct InsightRow {
    #[tabled(rename = "Priority")]
    pub priority: String,
    #[tabled(rename = "Insight")]
    pub title: String,
    #[tabled(rename = "Details")]
    pub message: String,
    #[tabled(rename = "Recommendation")]
    pub recommendation: String,
}

impl InsightRow {
    fn new(insight: &Insight, colour: bool) -> Self {
        let priority = insight.priority.to_string();
        Self {
            priority: match (colour, insight.priority) {
                (false, _) => priority,
                (true, Priority::High) => priority.red().to_string(),
                (true, Priority::Medium) => priority.yellow().to_string(),
                (true, Priority::Low) => priority.blue().to_string(),
            },
            title: insight.title.clone(),
            message: insight.message.clone(),
            recommendation: insight.recommendation.clone(),
        }
    }
}

/// Recommendation table row.
#[derive(Debug, Serialize, Tabled)]
pub struct RecommendationRow {
    #[tabled(rename = "Recommendation")]
    pub title: String,
    #[tabled(rename = "Details")]
    pub message: String,
    #[tabled(rename = "Next Step")]
    pub action: String,
}

impl From<&Recommendation> for RecommendationRow {
    fn from(r: &Recommendation) -> Self {
        Self {
            title: r.title.clone(),
            message: r.message.clone(),
            action: r.action.clone(),
        }
    }
}

/// Execute the insights command.
pub fn execute(ctx: &Context) -> Result<()> {
    let report = ctx.tracker()?.report()?;
    let colour = ctx.format == OutputFormat::Table;
    let insights: Vec<InsightRow> = report
        .insights
        .iter()
        .map(|i| InsightRow::new(i, colour))
        .collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Minimal => println!("{}", report.insights.len()),
        OutputFormat::Csv => print_output(&insights, ctx.format)?,
        OutputFormat::Table => {
            let summary = &report.summary;
            let mut rows = vec![
                KeyValue::new("Calculations", summary.total_calculations.to_string()),
                KeyValue::new("Most Used", summary.most_used_tool.label()),
            ];
            rows.extend(
                summary
                    .calculation_types
                    .iter()
                    .map(|(kind, count)| KeyValue::new(format!("  {}", kind.label()), count.to_string())),
            );
            if let Some(last) = summary.last_calculation {
                rows.push(KeyValue::new(
                    "Last Calculation",
                    last.format("%Y-%m-%d %H:%M UTC").to_string(),
                ));
            }

            print_header("Usage Summary");
            print_table(&rows)?;
            print_header("Insights");
            print_table(&insights)?;

            let recommendations: Vec<RecommendationRow> = report
                .recommendations
                .iter()
                .map(RecommendationRow::from)
                .collect();
            print_header("Recommendations");
            print_table(&recommendations)?;
        }
    }

    Ok(())
}
