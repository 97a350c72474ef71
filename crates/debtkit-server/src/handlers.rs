//! Request handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use debtkit_analytics::covenants::{track_covenants, CovenantInput, CovenantReport};
use debtkit_analytics::debt_brake::{calculate_debt_brake, DebtBrakeInput, DebtBrakeResult};
use debtkit_analytics::equity_swap::{analyze_equity_swap, EquitySwapInput, EquitySwapResult};
use debtkit_analytics::funding::{recommend_funding, FundingGuidance, FundingRequest};
use debtkit_analytics::loans::{
    analyze_loan_cost, cost_schedule, yearly_summary, CostAnalysisInput, CostAnalysisResult,
    YearlySummary,
};
use debtkit_analytics::payoff::{
    plan_snowball, prioritize_debts, PrioritizedDebt, SnowballInput, SnowballPlan,
};
use debtkit_analytics::policy::DebtPolicy;
use debtkit_analytics::AnalyticsError;
use debtkit_core::{CalculationKind, PaymentSchedule};
use debtkit_history::{
    AnalyticsTracker, Calculation, CalculationRecord, HistoryError, HistoryExport, HistoryReport,
    DEFAULT_RECENT_LIMIT,
};

/// Header carrying the client session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Application state.
pub struct AppState {
    /// Calculation history
    pub tracker: AnalyticsTracker,
    /// Calculator thresholds
    pub policy: DebtPolicy,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    history_backend: String,
}

/// Health check handler.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = state.tracker.store();
    Json(HealthResponse {
        status: if store.is_healthy() { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        history_backend: store.backend_name().to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Errors returned by handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed or its values are out of range.
    #[error("{0}")]
    BadRequest(String),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The history store failed.
    #[error("{0}")]
    Internal(String),
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        if err.is_input_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        ApiError::Internal(format!("history store failure: {err}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(msg) => {
                warn!("internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// A calculation result with the id it was filed under.
#[derive(Debug, Serialize)]
pub struct Tracked<T> {
    /// History record id
    pub record_id: Uuid,
    /// Calculation output
    #[serde(flatten)]
    pub result: T,
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Runs tracker work on the blocking pool; redb commits sync to disk.
async fn on_tracker<T, F>(state: &Arc<AppState>, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&AnalyticsTracker) -> Result<T, HistoryError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || work(&state.tracker))
        .await
        .map_err(|e| ApiError::Internal(format!("history task failed: {e}")))?
        .map_err(ApiError::from)
}

async fn track(
    state: &Arc<AppState>,
    headers: &HeaderMap,
    calculation: Calculation,
) -> Result<CalculationRecord, ApiError> {
    let session = session_id(headers);
    let record = on_tracker(state, move |tracker| tracker.track(calculation, session)).await?;
    debug!("filed {} as {}", record.kind(), record.id);
    Ok(record)
}

// =============================================================================
// CALCULATORS
// =============================================================================

/// Run the debt brake.
pub async fn debt_brake(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<DebtBrakeInput>, JsonRejection>,
) -> ApiResult<Tracked<DebtBrakeResult>> {
    let Json(input) = payload?;
    let result = calculate_debt_brake(&input, &state.policy.debt_brake)?;
    let record = track(&state, &headers, Calculation::DebtBrake { input, result }).await?;
    Ok(Json(Tracked {
        record_id: record.id,
        result,
    }))
}

/// Cost analysis request.
#[derive(Debug, Deserialize)]
pub struct CostAnalysisRequest {
    /// Loan terms
    #[serde(flatten)]
    pub input: CostAnalysisInput,
    /// Include the amortization schedule and its yearly roll-up
    #[serde(default)]
    pub include_schedule: bool,
}

/// Cost analysis response.
#[derive(Debug, Serialize)]
pub struct CostAnalysisResponse {
    /// Cost figures
    #[serde(flatten)]
    pub analysis: CostAnalysisResult,
    /// Period-by-period schedule, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<PaymentSchedule>,
    /// Schedule rolled up by loan year, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly: Option<Vec<YearlySummary>>,
}

/// Run a loan cost analysis.
pub async fn cost_analysis(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CostAnalysisRequest>, JsonRejection>,
) -> ApiResult<Tracked<CostAnalysisResponse>> {
    let Json(request) = payload?;
    let input = request.input;
    let analysis = analyze_loan_cost(&input)?;

    let (schedule, yearly) = if request.include_schedule {
        let schedule = cost_schedule(&input)?;
        let yearly = yearly_summary(&schedule, input.frequency);
        (Some(schedule), Some(yearly))
    } else {
        (None, None)
    };

    let record = track(
        &state,
        &headers,
        Calculation::CostAnalysis {
            input,
            result: analysis,
        },
    )
    .await?;
    Ok(Json(Tracked {
        record_id: record.id,
        result: CostAnalysisResponse {
            analysis,
            schedule,
            yearly,
        },
    }))
}

/// Snowball response.
#[derive(Debug, Serialize)]
pub struct SnowballResponse {
    /// The simulated plan
    #[serde(flatten)]
    pub plan: SnowballPlan,
    /// Each debt's payoff estimate on its minimum alone
    pub estimates: Vec<PrioritizedDebt>,
}

/// Build a snowball payoff plan.
pub async fn debt_snowball(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<SnowballInput>, JsonRejection>,
) -> ApiResult<Tracked<SnowballResponse>> {
    let Json(input) = payload?;
    let estimates = prioritize_debts(&input.debts)?;
    let plan = plan_snowball(&input, &state.policy.payoff)?;

    let record = track(
        &state,
        &headers,
        Calculation::DebtSnowball {
            input,
            result: plan.clone(),
        },
    )
    .await?;
    Ok(Json(Tracked {
        record_id: record.id,
        result: SnowballResponse { plan, estimates },
    }))
}

/// Check financial covenants.
pub async fn covenant_tracking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<CovenantInput>, JsonRejection>,
) -> ApiResult<Tracked<CovenantReport>> {
    let Json(input) = payload?;
    let report = track_covenants(&input, &state.policy.covenants)?;
    let record = track(
        &state,
        &headers,
        Calculation::Covenants {
            input,
            result: report.clone(),
        },
    )
    .await?;
    Ok(Json(Tracked {
        record_id: record.id,
        result: report,
    }))
}

/// Analyse a debt-equity swap.
pub async fn debt_equity(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<EquitySwapInput>, JsonRejection>,
) -> ApiResult<Tracked<EquitySwapResult>> {
    let Json(input) = payload?;
    let result = analyze_equity_swap(&input)?;
    let record = track(&state, &headers, Calculation::EquitySwap { input, result }).await?;
    Ok(Json(Tracked {
        record_id: record.id,
        result,
    }))
}

/// Recommend funding programmes.
pub async fn funding_guidance(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<FundingRequest>, JsonRejection>,
) -> ApiResult<Tracked<FundingGuidance>> {
    let Json(input) = payload?;
    let guidance = recommend_funding(&input)?;
    let record = track(
        &state,
        &headers,
        Calculation::FundingGuidance {
            input,
            result: guidance.clone(),
        },
    )
    .await?;
    Ok(Json(Tracked {
        record_id: record.id,
        result: guidance,
    }))
}

// =============================================================================
// HISTORY
// =============================================================================

/// Query parameters for history endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    /// Restrict to one calculation kind
    pub kind: Option<String>,
    /// Maximum number of records, newest first
    pub limit: Option<usize>,
}

impl HistoryQuery {
    fn kind(&self) -> Result<Option<CalculationKind>, ApiError> {
        self.kind
            .as_deref()
            .map(|k| k.parse::<CalculationKind>().map_err(ApiError::BadRequest))
            .transpose()
    }
}

/// History listing.
#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    /// Records, newest first
    pub records: Vec<CalculationRecord>,
    /// Number of records returned
    pub count: usize,
}

/// List recent calculations.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<HistoryListResponse> {
    let kind = query.kind()?;
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let records = on_tracker(&state, move |tracker| tracker.recent(kind, limit)).await?;
    Ok(Json(HistoryListResponse {
        count: records.len(),
        records,
    }))
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|e| ApiError::BadRequest(format!("invalid record id '{id}': {e}")))
}

/// Fetch one calculation.
pub async fn get_history_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<CalculationRecord> {
    let id = parse_id(&id)?;
    on_tracker(&state, move |tracker| tracker.get(id))
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Calculation not found: {id}")))
}

/// Delete one calculation.
pub async fn delete_history_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if on_tracker(&state, move |tracker| tracker.delete(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Calculation not found: {id}")))
    }
}

/// Result of clearing history.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Number of records removed
    pub removed: usize,
}

/// Clear all calculations, or those of one kind.
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<ClearResponse> {
    let kind = query.kind()?;
    let removed = on_tracker(&state, move |tracker| tracker.clear(kind)).await?;
    Ok(Json(ClearResponse { removed }))
}

/// Insights, recommendations and usage summary.
pub async fn insights(State(state): State<Arc<AppState>>) -> ApiResult<HistoryReport> {
    let report = on_tracker(&state, AnalyticsTracker::report).await?;
    Ok(Json(report))
}

/// Full history export.
pub async fn export(State(state): State<Arc<AppState>>) -> ApiResult<HistoryExport> {
    let export = on_tracker(&state, AnalyticsTracker::export).await?;
    Ok(Json(export))
}
