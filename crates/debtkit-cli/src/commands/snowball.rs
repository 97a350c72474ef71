//! Snowball command implementation.
//!
//! Plans the payoff of several debts, highest interest rate first. Debts come
//! from repeated `--debt name:balance:rate[:minimum]` flags or a CSV file with
//! the columns `name,balance,interest_rate,minimum_payment`.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use debtkit_analytics::payoff::{
    plan_snowball, prioritize_debts, Debt, PrioritizedDebt, SnowballInput, SnowballPlan,
};
use debtkit_core::{Money, Percent};
use debtkit_history::Calculation;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::{CliError, CliResult};
use crate::output::{format_money, print_header, print_output, print_table, KeyValue};

/// Arguments for the snowball command.
#[derive(Args, Debug)]
pub struct SnowballArgs {
    /// A debt as name:balance:rate[:minimum] (repeatable)
    #[arg(long = "debt", value_parser = parse_debt)]
    pub debts: Vec<Debt>,

    /// CSV file with columns name,balance,interest_rate,minimum_payment
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Total monthly amount available for debt payments
    #[arg(short, long)]
    pub budget: Decimal,

    /// Print the month-by-month timeline
    #[arg(long)]
    pub timeline: bool,
}

/// Parses `name:balance:rate[:minimum]`.
pub fn parse_debt(s: &str) -> Result<Debt, String> {
    let invalid = || CliError::InvalidDebt(s.to_string()).to_string();

    let parts: Vec<&str> = s.split(':').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) || parts[0].is_empty() {
        return Err(invalid());
    }

    let number = |part: &str| Decimal::from_str(part).map_err(|_| invalid());
    let mut debt = Debt::new(
        parts[0],
        Money::new(number(parts[1])?),
        Percent::new(number(parts[2])?),
    );
    if let Some(minimum) = parts.get(3) {
        debt = debt.with_minimum(Money::new(number(minimum)?));
    }
    Ok(debt)
}

#[derive(Debug, Deserialize)]
struct DebtRow {
    name: String,
    balance: Money,
    interest_rate: Percent,
    #[serde(default)]
    minimum_payment: Option<Money>,
}

/// Reads debts from a CSV file with a header row.
pub fn read_debts(path: &Path) -> CliResult<Vec<Debt>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut debts = Vec::new();
    for row in reader.deserialize::<DebtRow>() {
        let row = row?;
        debts.push(
            Debt::new(row.name, row.balance, row.interest_rate)
                .with_minimum(row.minimum_payment.unwrap_or_default()),
        );
    }
    Ok(debts)
}

/// Payoff order table row.
#[derive(Debug, Serialize, Tabled)]
pub struct PayoffRow {
    #[tabled(rename = "#")]
    pub priority: u32,
    #[tabled(rename = "Debt")]
    pub name: String,
    #[tabled(rename = "Balance")]
    pub balance: String,
    #[tabled(rename = "Rate")]
    pub rate: String,
    #[tabled(rename = "Minimum")]
    pub minimum: String,
    #[tabled(rename = "Paid Off (month)")]
    pub payoff_month: u32,
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[tabled(rename = "Minimum Only (months)")]
    pub minimum_only: String,
}

/// Timeline table row.
#[derive(Debug, Serialize, Tabled)]
pub struct MonthRow {
    #[tabled(rename = "Month")]
    pub month: u32,
    #[tabled(rename = "Payment")]
    pub payment: String,
    #[tabled(rename = "Interest")]
    pub interest: String,
    #[tabled(rename = "Remaining")]
    pub remaining: String,
}

#[derive(Debug, Serialize)]
struct SnowballOutput<'a> {
    #[serde(flatten)]
    plan: &'a SnowballPlan,
    estimates: &'a [PrioritizedDebt],
}

fn payoff_rows(plan: &SnowballPlan, estimates: &[PrioritizedDebt]) -> Vec<PayoffRow> {
    plan.debts
        .iter()
        .map(|d| {
            let minimum_only = estimates
                .iter()
                .find(|e| e.priority == d.priority)
                .and_then(|e| e.payoff_months)
                .map_or_else(|| "never".to_string(), |m| m.to_string());
            PayoffRow {
                priority: d.priority,
                name: d.name.clone(),
                balance: format_money(d.starting_balance),
                rate: d.interest_rate.to_string(),
                minimum: format_money(d.minimum_payment),
                payoff_month: d.payoff_month,
                interest: format_money(d.interest_paid),
                minimum_only,
            }
        })
        .collect()
}

/// Execute the snowball command.
pub fn execute(args: SnowballArgs, ctx: &Context) -> Result<()> {
    let mut debts = args.debts;
    if let Some(path) = &args.file {
        debts.extend(read_debts(path)?);
    }
    if debts.is_empty() {
        return Err(CliError::NoDebts.into());
    }

    let input = SnowballInput {
        debts,
        monthly_budget: Money::new(args.budget),
    };
    let estimates = prioritize_debts(&input.debts)?;
    let plan = plan_snowball(&input, &ctx.policy.payoff)?;

    ctx.track(Calculation::DebtSnowball {
        input,
        result: plan.clone(),
    });

    let rows = payoff_rows(&plan, &estimates);
    match ctx.format {
        OutputFormat::Json => {
            let output = SnowballOutput {
                plan: &plan,
                estimates: &estimates,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => println!("{}", plan.months_to_debt_free),
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Table => {
            let mut summary = vec![
                KeyValue::money("Monthly Budget", plan.monthly_budget),
                KeyValue::new("Months to Debt Free", plan.months_to_debt_free.to_string()),
                KeyValue::money("Total Interest", plan.total_interest),
                KeyValue::money("Total Paid", plan.total_paid),
            ];
            if let Some(saved) = plan.interest_saved {
                summary.push(KeyValue::money("Interest Saved vs Minimums", saved));
            }

            print_header("Debt Snowball");
            print_table(&summary)?;
            print_header("Payoff Order");
            print_table(&rows)?;

            if args.timeline {
                let months: Vec<MonthRow> = plan
                    .timeline
                    .iter()
                    .map(|m| MonthRow {
                        month: m.month,
                        payment: format_money(m.payment),
                        interest: format_money(m.interest),
                        remaining: format_money(m.remaining_balance),
                    })
                    .collect();
                print_header("Timeline");
                print_table(&months)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_debt() {
        let debt = parse_debt("Card:1500:19.9:40").unwrap();
        assert_eq!(debt.name, "Card");
        assert_eq!(debt.balance.amount(), Decimal::new(1500, 0));
        assert_eq!(debt.interest_rate.value(), Decimal::new(199, 1));
        assert_eq!(debt.minimum_payment.amount(), Decimal::new(40, 0));

        let no_minimum = parse_debt("Loan:10000:5").unwrap();
        assert!(no_minimum.minimum_payment.is_zero());
    }

    #[test]
    fn test_parse_debt_rejects_bad_input() {
        assert!(parse_debt("Card:1500").is_err());
        assert!(parse_debt(":1500:5").is_err());
        assert!(parse_debt("Card:lots:5").is_err());
        assert!(parse_debt("Card:1:2:3:4").is_err());
    }

    #[test]
    fn test_read_debts_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,balance,interest_rate,minimum_payment").unwrap();
        writeln!(file, "Card, 1500, 19.9, 40").unwrap();
        writeln!(file, "Loan,10000,5,").unwrap();

        let debts = read_debts(file.path()).unwrap();
        assert_eq!(debts.len(), 2);
        assert_eq!(debts[0].name, "Card");
        assert!(debts[1].minimum_payment.is_zero());
    }
}
