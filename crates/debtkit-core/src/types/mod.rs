//! Domain types for debt analytics.
//!
//! - [`Money`]: monetary amount
//! - [`Percent`]: rate quoted in percent
//! - [`Currency`]: ISO currency codes
//! - [`Frequency`]: loan payment frequency
//! - [`ScheduledPayment`] / [`PaymentSchedule`]: amortization rows
//! - [`CalculationKind`]: calculator identifiers used by the history layer

mod currency;
mod frequency;
mod kind;
mod money;
mod percent;
mod schedule;

pub use currency::Currency;
pub use frequency::Frequency;
pub use kind::CalculationKind;
pub use money::Money;
pub use percent::Percent;
pub use schedule::{PaymentSchedule, ScheduledPayment};
