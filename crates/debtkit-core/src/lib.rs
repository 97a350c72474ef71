//! # Debtkit Core
//!
//! Core types and errors for the Debtkit SME debt management toolkit.
//!
//! This crate provides the building blocks shared by every other Debtkit crate:
//!
//! - **Types**: `Money`, `Percent`, `Currency`, `Frequency`, payment schedules
//! - **Calculation kinds**: the identifiers used to file calculations in history
//! - **Errors**: `DebtkitError` and the `DebtkitResult` alias
//!
//! ## Example
//!
//! ```rust
//! use debtkit_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let principal = Money::new(dec!(100000));
//! let rate = Percent::new(dec!(5.0));
//! assert_eq!(rate.as_decimal(), dec!(0.05));
//! assert_eq!(principal * rate.as_decimal(), Money::new(dec!(5000.000)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{DebtkitError, DebtkitResult};
    pub use crate::types::{
        CalculationKind, Currency, Frequency, Money, PaymentSchedule, Percent, ScheduledPayment,
    };
}

// Re-export commonly used types at crate root
pub use error::{DebtkitError, DebtkitResult};
pub use types::{
    CalculationKind, Currency, Frequency, Money, PaymentSchedule, Percent, ScheduledPayment,
};
