//! Cost command implementation.
//!
//! Analyses the full cost of a loan and optionally prints its amortization
//! schedule and yearly roll-up.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use debtkit_analytics::loans::{
    analyze_loan_cost, cost_schedule, yearly_summary, CostAnalysisInput, CostAnalysisResult,
    YearlySummary,
};
use debtkit_core::{Frequency, Money, Percent, ScheduledPayment};
use debtkit_history::Calculation;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_money, print_header, print_output, print_report, KeyValue};

/// Arguments for the cost command.
#[derive(Args, Debug)]
pub struct CostArgs {
    /// Amount borrowed
    #[arg(short, long)]
    pub principal: Decimal,

    /// Annual interest rate (as percentage, e.g., 5.5 for 5.5%)
    #[arg(short, long)]
    pub rate: Decimal,

    /// Term in years
    #[arg(short, long)]
    pub years: Decimal,

    /// Payment frequency: monthly, quarterly, semi-annual, annual
    #[arg(long, default_value = "monthly")]
    pub frequency: Frequency,

    /// One-off fees paid at origination
    #[arg(long, default_value = "0")]
    pub upfront_fees: Decimal,

    /// Fee charged with every instalment
    #[arg(long, default_value = "0")]
    pub periodic_fees: Decimal,

    /// Tax rate at which interest is deductible (as percentage)
    #[arg(long, default_value = "0")]
    pub tax_rate: Decimal,

    /// Annual return the cash could earn elsewhere (as percentage)
    #[arg(long, default_value = "8")]
    pub opportunity_rate: Decimal,

    /// Print the period-by-period schedule
    #[arg(long)]
    pub schedule: bool,

    /// Print the schedule rolled up by loan year
    #[arg(long)]
    pub yearly: bool,
}

/// Cost analysis with optional schedules, as printed in JSON.
#[derive(Debug, Serialize)]
struct CostOutput {
    #[serde(flatten)]
    analysis: CostAnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<ScheduledPayment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    yearly: Option<Vec<YearlySummary>>,
}

/// Schedule table row.
#[derive(Debug, Serialize, Tabled)]
pub struct ScheduleRow {
    #[tabled(rename = "Period")]
    pub period: u32,
    #[tabled(rename = "Payment")]
    pub payment: String,
    #[tabled(rename = "Principal")]
    pub principal: String,
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[tabled(rename = "Fee")]
    pub fee: String,
    #[tabled(rename = "Balance")]
    pub balance: String,
}

impl From<&ScheduledPayment> for ScheduleRow {
    fn from(p: &ScheduledPayment) -> Self {
        Self {
            period: p.period,
            payment: format_money(p.payment),
            principal: format_money(p.principal),
            interest: format_money(p.interest),
            fee: format_money(p.fee),
            balance: format_money(p.balance),
        }
    }
}

/// Yearly table row.
#[derive(Debug, Serialize, Tabled)]
pub struct YearRow {
    #[tabled(rename = "Year")]
    pub year: u32,
    #[tabled(rename = "Principal")]
    pub principal: String,
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[tabled(rename = "Fees")]
    pub fees: String,
    #[tabled(rename = "Closing Balance")]
    pub closing_balance: String,
}

impl From<&YearlySummary> for YearRow {
    fn from(y: &YearlySummary) -> Self {
        Self {
            year: y.year,
            principal: format_money(y.principal),
            interest: format_money(y.interest),
            fees: format_money(y.fees),
            closing_balance: format_money(y.closing_balance),
        }
    }
}

/// Execute the cost command.
pub fn execute(args: CostArgs, ctx: &Context) -> Result<()> {
    let input = CostAnalysisInput::new(
        Money::new(args.principal),
        Percent::new(args.rate),
        args.years,
    )
    .with_frequency(args.frequency)
    .with_fees(Money::new(args.upfront_fees), Money::new(args.periodic_fees))
    .with_tax_rate(Percent::new(args.tax_rate))
    .with_opportunity_rate(Percent::new(args.opportunity_rate));

    let analysis = analyze_loan_cost(&input)?;
    let schedule = if args.schedule || args.yearly {
        Some(cost_schedule(&input)?)
    } else {
        None
    };
    let yearly = schedule
        .as_ref()
        .filter(|_| args.yearly)
        .map(|s| yearly_summary(s, input.frequency));

    ctx.track(Calculation::CostAnalysis {
        input,
        result: analysis,
    });

    let rows = vec![
        KeyValue::money("Principal", analysis.principal),
        KeyValue::new("Interest Rate", analysis.interest_rate.to_string()),
        KeyValue::new("Term", format!("{} years", analysis.term_years.normalize())),
        KeyValue::new("Frequency", analysis.frequency.to_string()),
        KeyValue::new("Payments", analysis.periods.to_string()),
        KeyValue::money("Periodic Payment", analysis.periodic_payment),
        KeyValue::money("Total Payment", analysis.total_payment),
        KeyValue::money("Total Interest", analysis.total_interest),
        KeyValue::money("Total Fees", analysis.total_fees),
        KeyValue::money("Total Cost", analysis.total_cost),
        KeyValue::money("After-Tax Interest", analysis.after_tax_interest),
        KeyValue::money("After-Tax Cost", analysis.after_tax_cost),
        KeyValue::new("Effective Rate", analysis.effective_rate.to_string()),
        KeyValue::money("Forgone Return", analysis.forgone_return),
        KeyValue::money("Financing Advantage", analysis.financing_advantage),
    ];

    let schedule_rows: Vec<ScheduleRow> = schedule
        .iter()
        .filter(|_| args.schedule)
        .flat_map(|s| s.iter().map(ScheduleRow::from))
        .collect();
    let year_rows: Vec<YearRow> = yearly.iter().flatten().map(YearRow::from).collect();

    match ctx.format {
        OutputFormat::Json => {
            let output = CostOutput {
                analysis,
                schedule: schedule
                    .filter(|_| args.schedule)
                    .map(|s| s.payments().to_vec()),
                yearly,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        // CSV prints the most detailed table requested
        OutputFormat::Csv if args.schedule => print_output(&schedule_rows, ctx.format)?,
        OutputFormat::Csv if args.yearly => print_output(&year_rows, ctx.format)?,
        format => {
            print_report(
                "Loan Cost Analysis",
                &rows,
                &analysis,
                &analysis.periodic_payment.to_string(),
                format,
            )?;
            if format == OutputFormat::Table {
                if args.yearly {
                    print_header("Yearly Summary");
                    print_output(&year_rows, format)?;
                }
                if args.schedule {
                    print_header("Amortization Schedule");
                    print_output(&schedule_rows, format)?;
                }
            }
        }
    }

    Ok(())
}
