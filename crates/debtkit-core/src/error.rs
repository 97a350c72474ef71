//! Error types for Debtkit.
//!
//! Structured errors shared by the calculators, the history layer and
//! the user-facing surfaces.

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for Debtkit operations.
pub type DebtkitResult<T> = Result<T, DebtkitError>;

/// The main error type for Debtkit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DebtkitError {
    /// A required input is missing or out of its domain.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of what is wrong.
        reason: String,
    },

    /// A monetary amount is negative or otherwise unusable.
    #[error("Invalid amount for {field}: {value} - {reason}")]
    InvalidAmount {
        /// Name of the offending field.
        field: String,
        /// The value that was provided.
        value: Decimal,
        /// Reason for invalidity.
        reason: String,
    },

    /// A rate (interest, tax, ratio) is out of bounds.
    #[error("Invalid rate for {field}: {value}% - {reason}")]
    InvalidRate {
        /// Name of the offending field.
        field: String,
        /// The rate that was provided, in percent.
        value: Decimal,
        /// Reason for invalidity.
        reason: String,
    },

    /// A payment never retires the balance it is applied to.
    #[error("Debt is never paid off: {reason}")]
    NeverPaysOff {
        /// Description of the shortfall.
        reason: String,
    },

    /// Mathematical error (division by zero, overflow, etc.).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },
}

impl DebtkitError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(field: impl Into<String>, value: Decimal, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(field: impl Into<String>, value: Decimal, reason: impl Into<String>) -> Self {
        Self::InvalidRate {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Creates a never-pays-off error.
    #[must_use]
    pub fn never_pays_off(reason: impl Into<String>) -> Self {
        Self::NeverPaysOff {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config_error(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }

    /// Returns true if the error was caused by caller-supplied input.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::InvalidAmount { .. }
                | Self::InvalidRate { .. }
                | Self::NeverPaysOff { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = DebtkitError::invalid_amount("revenue", dec!(-5), "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("revenue"));
        assert!(msg.contains("-5"));
    }

    #[test]
    fn test_input_classification() {
        assert!(DebtkitError::never_pays_off("minimum below interest").is_input_error());
        assert!(DebtkitError::invalid_input("no debts").is_input_error());
        assert!(!DebtkitError::math_error("overflow").is_input_error());
        assert!(!DebtkitError::config_error("bad ratio").is_input_error());
    }
}
