//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use debtkit_analytics::policy::DebtPolicy;
use debtkit_history::{AnalyticsTracker, InMemoryHistoryStore};

use crate::handlers::{self, AppState};

/// Create the API router with in-memory history and default thresholds.
pub fn create_router() -> Router {
    create_router_with_tracker(
        AnalyticsTracker::new(Arc::new(InMemoryHistoryStore::new())),
        DebtPolicy::default(),
    )
}

/// Create the API router.
///
/// # Arguments
/// * `tracker` - Calculation history
/// * `policy` - Calculator thresholds
pub fn create_router_with_tracker(tracker: AnalyticsTracker, policy: DebtPolicy) -> Router {
    let state = Arc::new(AppState { tracker, policy });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/health", get(handlers::health))
        // Calculators
        .route("/api/debt-brake", post(handlers::debt_brake))
        .route("/api/cost-analysis", post(handlers::cost_analysis))
        .route("/api/debt-snowball", post(handlers::debt_snowball))
        .route("/api/covenant-tracking", post(handlers::covenant_tracking))
        .route("/api/debt-equity", post(handlers::debt_equity))
        .route("/api/funding-guidance", post(handlers::funding_guidance))
        // History
        .route(
            "/api/history",
            get(handlers::list_history).delete(handlers::clear_history),
        )
        .route(
            "/api/history/:id",
            get(handlers::get_history_record).delete(handlers::delete_history_record),
        )
        .route("/api/insights", get(handlers::insights))
        .route("/api/export", get(handlers::export))
        .with_state(state)
}
