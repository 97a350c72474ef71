//! History command implementation.
//!
//! Lists, shows and removes recorded calculations.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use debtkit_core::CalculationKind;
use debtkit_history::{CalculationRecord, DEFAULT_RECENT_LIMIT};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_header, print_output, print_success};

/// Arguments for the history command.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

/// History subcommands.
#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    /// List recent calculations, newest first
    List(ListArgs),

    /// Show one calculation with its inputs and results
    Show(IdArgs),

    /// Delete one calculation
    Delete(IdArgs),

    /// Delete all calculations, or those of one kind
    Clear(ClearArgs),
}

/// Arguments for list subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only this kind (brake, cost, snowball, covenants, swap, funding)
    #[arg(short, long)]
    pub kind: Option<CalculationKind>,

    /// Maximum number of calculations
    #[arg(short, long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub limit: usize,
}

/// Arguments for subcommands addressing one calculation.
#[derive(Args, Debug)]
pub struct IdArgs {
    /// Calculation id
    pub id: String,
}

/// Arguments for clear subcommand.
#[derive(Args, Debug)]
pub struct ClearArgs {
    /// Only this kind
    #[arg(short, long)]
    pub kind: Option<CalculationKind>,
}

/// History table row.
#[derive(Debug, Serialize, Tabled)]
pub struct RecordRow {
    #[tabled(rename = "Id")]
    pub id: String,
    #[tabled(rename = "Calculation")]
    pub kind: String,
    #[tabled(rename = "Time (UTC)")]
    pub timestamp: String,
}

impl From<&CalculationRecord> for RecordRow {
    fn from(r: &CalculationRecord) -> Self {
        Self {
            id: r.id.to_string(),
            kind: r.kind().label().to_string(),
            timestamp: r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

fn parse_id(id: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(id).map_err(|_| CliError::InvalidId(id.to_string()))
}

/// Execute the history command.
pub fn execute(args: HistoryArgs, ctx: &Context) -> Result<()> {
    let tracker = ctx.tracker()?;

    match args.command {
        HistoryCommand::List(list) => {
            let records = tracker.recent(list.kind, list.limit)?;
            match ctx.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Minimal => println!("{}", records.len()),
                format => {
                    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
                    if format == OutputFormat::Table {
                        print_header("Calculation History");
                    }
                    print_output(&rows, format)?;
                }
            }
        }
        HistoryCommand::Show(show) => {
            let id = parse_id(&show.id)?;
            let record = tracker
                .get(id)?
                .ok_or_else(|| CliError::NotFound(id.to_string()))?;
            match ctx.format {
                OutputFormat::Minimal => println!("{}", record.kind()),
                _ => println!("{}", serde_json::to_string_pretty(&record)?),
            }
        }
        HistoryCommand::Delete(delete) => {
            let id = parse_id(&delete.id)?;
            if !tracker.delete(id)? {
                return Err(CliError::NotFound(id.to_string()).into());
            }
            print_success(&format!("Deleted {}", id));
        }
        HistoryCommand::Clear(clear) => {
            let removed = tracker.clear(clear.kind)?;
            print_success(&format!("Removed {} calculation(s)", removed));
        }
    }

    Ok(())
}
