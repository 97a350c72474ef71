//! Swap command implementation.
//!
//! Analyses converting part of the debt into a creditor equity stake.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use debtkit_analytics::equity_swap::{analyze_equity_swap, EquitySwapInput};
use debtkit_core::{Money, Percent};
use debtkit_history::Calculation;

use crate::commands::Context;
use crate::output::{format_ratio, print_report, KeyValue};

/// Arguments for the swap command.
#[derive(Args, Debug)]
pub struct SwapArgs {
    /// Debt outstanding before the swap
    #[arg(long)]
    pub total_debt: Decimal,

    /// Portion of the debt converted into equity
    #[arg(long)]
    pub convert: Decimal,

    /// Equity value before the swap
    #[arg(long)]
    pub equity: Decimal,

    /// Annual interest rate on the converted debt (as percentage)
    #[arg(long, default_value = "0")]
    pub rate: Decimal,

    /// EBITDA, for leverage before and after
    #[arg(long)]
    pub ebitda: Option<Decimal>,
}

/// Execute the swap command.
pub fn execute(args: SwapArgs, ctx: &Context) -> Result<()> {
    let input = EquitySwapInput {
        total_debt: Money::new(args.total_debt),
        conversion_amount: Money::new(args.convert),
        equity_value: Money::new(args.equity),
        interest_rate: Percent::new(args.rate),
        ebitda: args.ebitda.map(Money::new),
    };

    let result = analyze_equity_swap(&input)?;
    ctx.track(Calculation::EquitySwap { input, result });

    let mut rows = vec![
        KeyValue::money("Remaining Debt", result.remaining_debt),
        KeyValue::money("Post-Swap Equity", result.post_swap_equity),
        KeyValue::new("Creditor Stake", result.creditor_stake.to_string()),
        KeyValue::new("Owner Stake", result.owner_stake.to_string()),
        KeyValue::money("Annual Interest Saved", result.annual_interest_saved),
        KeyValue::new(
            "Debt/Equity",
            format!(
                "{} → {}",
                format_ratio(result.debt_to_equity_before),
                format_ratio(result.debt_to_equity_after)
            ),
        ),
    ];
    if let (Some(before), Some(after)) = (result.debt_to_ebitda_before, result.debt_to_ebitda_after)
    {
        rows.push(KeyValue::new(
            "Debt/EBITDA",
            format!("{} → {}", format_ratio(before), format_ratio(after)),
        ));
    }

    print_report(
        "Debt-Equity Swap",
        &rows,
        &result,
        &result.creditor_stake.to_string(),
        ctx.format,
    )
}
