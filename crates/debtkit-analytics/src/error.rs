//! Error types for the analytics calculators.

use thiserror::Error;

use debtkit_core::DebtkitError;

/// Unified error type for all analytics operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Invalid input parameter
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A payment never retires the balance
    #[error("debt is never paid off: {0}")]
    NeverPaysOff(String),

    /// Payoff simulation ran past the configured horizon
    #[error("payoff plan exceeds {max_months} months")]
    HorizonExceeded {
        /// The configured simulation horizon.
        max_months: u32,
    },

    /// Schedule generation failed
    #[error("schedule generation failed: {0}")]
    ScheduleGenerationFailed(String),

    /// Inputs produce values beyond the decimal range
    #[error("result out of range: {0}")]
    Overflow(String),

    /// Math error
    #[error("math error: {0}")]
    MathError(String),

    /// Error raised by a core type
    #[error(transparent)]
    Core(#[from] DebtkitError),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Returns true if the error was caused by caller-supplied input.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        match self {
            AnalyticsError::InvalidInput(_)
            | AnalyticsError::NeverPaysOff(_)
            | AnalyticsError::HorizonExceeded { .. }
            | AnalyticsError::Overflow(_) => true,
            AnalyticsError::Core(inner) => inner.is_input_error(),
            AnalyticsError::ScheduleGenerationFailed(_) | AnalyticsError::MathError(_) => false,
        }
    }
}
