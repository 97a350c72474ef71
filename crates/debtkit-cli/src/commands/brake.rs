//! Brake command implementation.
//!
//! Computes the debt ceiling and debt service capacity from revenue.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rust_decimal::Decimal;

use debtkit_analytics::debt_brake::{calculate_debt_brake, DebtBrakeInput, DebtBrakeStatus};
use debtkit_core::Money;
use debtkit_history::Calculation;

use crate::commands::Context;
use crate::output::{print_report, KeyValue};

/// Arguments for the brake command.
#[derive(Args, Debug)]
pub struct BrakeArgs {
    /// Annual revenue
    #[arg(short, long)]
    pub revenue: Decimal,

    /// Annual operating expenses
    #[arg(short, long, default_value = "0")]
    pub expenses: Decimal,

    /// Debt already on the balance sheet
    #[arg(short, long, default_value = "0")]
    pub debt: Decimal,

    /// Share of net income available for debt service (e.g. 0.3)
    #[arg(long)]
    pub service_ratio: Option<Decimal>,
}

fn status_text(status: DebtBrakeStatus) -> String {
    let label = status.to_string();
    match status {
        DebtBrakeStatus::WithinLimits => label.green().to_string(),
        DebtBrakeStatus::ApproachingLimit => label.yellow().to_string(),
        DebtBrakeStatus::ExceedsLimit => label.red().to_string(),
    }
}

/// Execute the brake command.
pub fn execute(args: BrakeArgs, ctx: &Context) -> Result<()> {
    let mut input = DebtBrakeInput::new(Money::new(args.revenue))
        .with_expenses(Money::new(args.expenses))
        .with_existing_debt(Money::new(args.debt));
    if let Some(ratio) = args.service_ratio {
        input = input.with_service_ratio(ratio);
    }

    let result = calculate_debt_brake(&input, &ctx.policy.debt_brake)?;
    ctx.track(Calculation::DebtBrake { input, result });

    let rows = vec![
        KeyValue::money("Revenue", result.revenue),
        KeyValue::money("Existing Debt", result.existing_debt),
        KeyValue::new("Limit", result.limit_percentage.to_string()),
        KeyValue::money("Debt Limit", result.debt_limit),
        KeyValue::money("Available Capacity", result.available_capacity),
        KeyValue::new("Debt Usage", result.debt_usage.to_string()),
        KeyValue::new("Status", status_text(result.status)),
        KeyValue::money("Net Income", result.net_income),
        KeyValue::money("Max Debt Service", result.max_debt_service),
        KeyValue::money("Max Monthly Debt Service", result.max_monthly_debt_service),
    ];

    print_report(
        "Debt Brake",
        &rows,
        &result,
        &result.available_capacity.to_string(),
        ctx.format,
    )
}
