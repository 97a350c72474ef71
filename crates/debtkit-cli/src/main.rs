//! Debtkit CLI - Command-line interface for SME debt management.
//!
//! # Usage
//!
//! ```bash
//! # Debt ceiling for 2M revenue with 5k existing debt
//! debtkit brake --revenue 2000000 --expenses 1500000 --debt 5000
//!
//! # Full cost of a 5-year loan with its yearly roll-up
//! debtkit cost --principal 100000 --rate 6 --years 5 --yearly
//!
//! # Snowball plan for two debts
//! debtkit snowball --debt Card:1500:19.9:40 --debt Loan:10000:5:200 --budget 600
//!
//! # Trends over past calculations
//! debtkit insights
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::{Context, HistoryLocation};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    let default_filter = if cli.verbose {
        "info,debtkit=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let history = HistoryLocation::resolve(cli.history, cli.no_history)?;
    let ctx = Context::new(cli.format, history);

    // Execute command
    match cli.command {
        Commands::Brake(args) => commands::brake::execute(args, &ctx)?,
        Commands::Cost(args) => commands::cost::execute(args, &ctx)?,
        Commands::Snowball(args) => commands::snowball::execute(args, &ctx)?,
        Commands::Covenants(args) => commands::covenants::execute(args, &ctx)?,
        Commands::Swap(args) => commands::swap::execute(args, &ctx)?,
        Commands::Funding(args) => commands::funding::execute(args, &ctx)?,
        Commands::History(args) => commands::history::execute(args, &ctx)?,
        Commands::Insights => commands::insights::execute(&ctx)?,
        Commands::Export(args) => commands::export::execute(args, &ctx)?,
    }

    Ok(())
}
