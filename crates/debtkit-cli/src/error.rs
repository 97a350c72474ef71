//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--debt` value could not be parsed.
    #[error("Invalid debt '{0}'. Use name:balance:rate[:minimum].")]
    InvalidDebt(String),

    /// Neither `--debt` nor `--file` was given.
    #[error("No debts given. Use --debt or --file.")]
    NoDebts,

    /// The command needs history but `--no-history` was given.
    #[error("History is disabled (--no-history).")]
    HistoryDisabled,

    /// No default data directory could be found.
    #[error("Cannot determine a data directory. Use --history <path>.")]
    NoDataDir,

    /// A record id did not parse.
    #[error("Invalid record id: {0}")]
    InvalidId(String),

    /// A record id was not in history.
    #[error("Calculation not found: {0}")]
    NotFound(String),

    /// Calculation error.
    #[error("Calculation error: {0}")]
    Calculation(#[from] debtkit_analytics::AnalyticsError),

    /// History store error.
    #[error("History error: {0}")]
    History(#[from] debtkit_history::HistoryError),

    /// CSV input error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
