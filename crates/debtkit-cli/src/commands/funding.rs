//! Funding command implementation.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use debtkit_analytics::funding::{recommend_funding, CompanySize, FundingProgram, FundingRequest};
use debtkit_core::Money;
use debtkit_history::Calculation;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_money, print_header, print_output};

/// Arguments for the funding command.
#[derive(Args, Debug)]
pub struct FundingArgs {
    /// Company size: small, medium, large
    #[arg(short, long, default_value = "small")]
    pub size: CompanySize,

    /// Amount to raise
    #[arg(short, long)]
    pub amount: Option<Decimal>,
}

/// Programme table row.
#[derive(Debug, Serialize, Tabled)]
pub struct ProgramRow {
    #[tabled(rename = "Programme")]
    pub name: String,
    #[tabled(rename = "Provider")]
    pub provider: String,
    #[tabled(rename = "Up To")]
    pub max_amount: String,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&FundingProgram> for ProgramRow {
    fn from(p: &FundingProgram) -> Self {
        Self {
            name: p.name.clone(),
            provider: p.provider.clone(),
            max_amount: format_money(p.max_amount),
            rate: p.interest_rate.to_string(),
            description: p.description.clone(),
        }
    }
}

/// Execute the funding command.
pub fn execute(args: FundingArgs, ctx: &Context) -> Result<()> {
    let mut request = FundingRequest::new(args.size);
    if let Some(amount) = args.amount {
        request = request.with_amount(Money::new(amount));
    }

    let guidance = recommend_funding(&request)?;
    ctx.track(Calculation::FundingGuidance {
        input: request,
        result: guidance.clone(),
    });

    let rows: Vec<ProgramRow> = guidance.programs.iter().map(ProgramRow::from).collect();
    match ctx.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&guidance)?),
        OutputFormat::Minimal => println!("{}", guidance.count),
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Table => {
            print_header(&format!("Funding Programmes ({} company)", guidance.company_size));
            print_output(&rows, ctx.format)?;
        }
    }

    Ok(())
}
