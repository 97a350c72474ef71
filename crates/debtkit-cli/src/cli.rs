//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    BrakeArgs, CostArgs, CovenantArgs, ExportArgs, FundingArgs, HistoryArgs, SnowballArgs,
    SwapArgs,
};

/// Debtkit - debt management toolkit for small and medium enterprises
#[derive(Parser)]
#[command(name = "debtkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// History file (redb). Defaults to debtkit/history.redb in the data directory.
    #[arg(long, env = "DEBTKIT_HISTORY", global = true)]
    pub history: Option<PathBuf>,

    /// Do not record calculations in history
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Debt ceiling and debt service capacity from revenue
    Brake(BrakeArgs),

    /// Full cost of a loan, optionally with its amortization schedule
    Cost(CostArgs),

    /// Snowball payoff plan for several debts
    Snowball(SnowballArgs),

    /// Check leverage, liquidity and gearing covenants
    Covenants(CovenantArgs),

    /// Analyse a debt-equity swap
    Swap(SwapArgs),

    /// Suggest public funding programmes
    Funding(FundingArgs),

    /// Browse and manage calculation history
    History(HistoryArgs),

    /// Trends and recommendations from history
    Insights,

    /// Export history with insights as JSON
    Export(ExportArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}
