//! Covenants command implementation.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use debtkit_analytics::covenants::{track_covenants, Bound, CovenantCheck, CovenantInput};
use debtkit_core::Money;
use debtkit_history::Calculation;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_ratio, print_header, print_output, status_label};

/// Arguments for the covenants command.
#[derive(Args, Debug)]
pub struct CovenantArgs {
    /// Total interest-bearing debt
    #[arg(long)]
    pub total_debt: Decimal,

    /// EBITDA
    #[arg(long)]
    pub ebitda: Decimal,

    /// Current assets
    #[arg(long)]
    pub current_assets: Decimal,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Decimal,

    /// Net worth (book equity)
    #[arg(long)]
    pub net_worth: Decimal,
}

/// Covenant table row.
#[derive(Debug, Serialize, Tabled)]
pub struct CovenantRow {
    #[tabled(rename = "Covenant")]
    pub covenant: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Limit")]
    pub limit: String,
    #[tabled(rename = "Headroom")]
    pub headroom: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl CovenantRow {
    fn new(check: &CovenantCheck, colour: bool) -> Self {
        let limit = match check.bound {
            Bound::Maximum => format!("≤ {}", format_ratio(check.threshold)),
            Bound::Minimum => format!("≥ {}", format_ratio(check.threshold)),
        };
        let status = if colour {
            status_label(check.compliant, "Compliant", "Breached")
        } else if check.compliant {
            "Compliant".to_string()
        } else {
            "Breached".to_string()
        };
        Self {
            covenant: check.covenant.label().to_string(),
            value: if check.defined {
                format_ratio(check.value)
            } else {
                "n/a".to_string()
            },
            limit,
            headroom: check.headroom.map_or_else(|| "-".to_string(), format_ratio),
            status,
        }
    }
}

/// Execute the covenants command.
pub fn execute(args: CovenantArgs, ctx: &Context) -> Result<()> {
    let input = CovenantInput {
        total_debt: Money::new(args.total_debt),
        ebitda: Money::new(args.ebitda),
        current_assets: Money::new(args.current_assets),
        current_liabilities: Money::new(args.current_liabilities),
        net_worth: Money::new(args.net_worth),
    };

    let report = track_covenants(&input, &ctx.policy.covenants)?;
    ctx.track(Calculation::Covenants {
        input,
        result: report.clone(),
    });

    let colour = ctx.format == OutputFormat::Table;
    let rows: Vec<CovenantRow> = report
        .checks
        .iter()
        .map(|c| CovenantRow::new(c, colour))
        .collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Minimal => println!(
            "{}",
            if report.overall_compliant {
                "compliant"
            } else {
                "breached"
            }
        ),
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Table => {
            print_header("Covenant Tracking");
            print_output(&rows, ctx.format)?;
            println!(
                "Overall: {} ({} breach{})",
                status_label(report.overall_compliant, "Compliant", "Breached"),
                report.breaches,
                if report.breaches == 1 { "" } else { "es" }
            );
        }
    }

    Ok(())
}
