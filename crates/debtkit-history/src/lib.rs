//! Debtkit History
//!
//! Calculation history for the Debtkit toolkit: every calculation can be
//! filed as a [`CalculationRecord`], kept in a [`HistoryStore`], and analysed
//! for trends.
//!
//! # Features
//!
//! - **Typed records**: each record carries the calculator's input and result
//! - **Multiple backends**: redb (persistent) and in-memory stores
//! - **Tracking**: [`AnalyticsTracker`] caps history and serves recent entries
//! - **Insights**: debt and interest trends, capacity warnings
//! - **Recommendations, summary and export**
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use debtkit_analytics::prelude::*;
//! use debtkit_core::Money;
//! use debtkit_history::{AnalyticsTracker, Calculation, InMemoryHistoryStore};
//! use rust_decimal_macros::dec;
//!
//! let tracker = AnalyticsTracker::new(Arc::new(InMemoryHistoryStore::new()));
//!
//! let input = DebtBrakeInput::new(Money::new(dec!(1000000)));
//! let result = calculate_debt_brake(&input, &DebtBrakePolicy::default()).unwrap();
//! tracker.track(Calculation::DebtBrake { input, result }, None).unwrap();
//!
//! assert_eq!(tracker.report().unwrap().summary.total_calculations, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod adapter;
mod error;
mod memory;
mod redb;

pub mod export;
pub mod insights;
pub mod recommendations;
pub mod record;
pub mod summary;
pub mod tracker;

pub use adapter::HistoryStore;
pub use error::{HistoryError, HistoryResult};
pub use export::{HistoryExport, HistoryReport};
pub use insights::{generate_insights, Insight, InsightKind, Priority};
pub use memory::InMemoryHistoryStore;
pub use recommendations::{generate_recommendations, Recommendation, RecommendationKind};
pub use record::{Calculation, CalculationRecord};
pub use crate::redb::RedbHistoryStore;
pub use summary::HistorySummary;
pub use tracker::{AnalyticsTracker, DEFAULT_CAPACITY, DEFAULT_RECENT_LIMIT};
