//! Integration tests for the Debtkit Server API endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use debtkit_analytics::policy::DebtPolicy;
use debtkit_history::{AnalyticsTracker, RedbHistoryStore};
use debtkit_server::config::ServerConfig;
use debtkit_server::routes::{create_router, create_router_with_tracker};
use debtkit_server::Server;

/// Send a request and decode the JSON body, if any.
async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-session-id", "test-session")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn delete(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn brake_body(existing_debt: u32) -> Value {
    json!({
        "revenue": 1000000,
        "expenses": 600000,
        "existing_debt": existing_debt
    })
}

// =============================================================================
// HEALTH
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = create_router();
    let (status, json) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["history_backend"], "memory");
}

// =============================================================================
// CALCULATORS
// =============================================================================

#[tokio::test]
async fn test_debt_brake() {
    let app = create_router();
    let (status, json) = post_json(app, "/api/debt-brake", brake_body(1000)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["debt_limit"].as_f64(), Some(3500.0));
    assert_eq!(json["available_capacity"].as_f64(), Some(2500.0));
    assert_eq!(json["net_income"].as_f64(), Some(400000.0));
    assert_eq!(json["max_debt_service"].as_f64(), Some(120000.0));
    assert_eq!(json["max_monthly_debt_service"].as_f64(), Some(10000.0));
    assert_eq!(json["status"], "within_limits");
    assert!(json["record_id"].is_string());
}

#[tokio::test]
async fn test_debt_brake_exceeds_limit() {
    let app = create_router();
    let (status, json) = post_json(app, "/api/debt-brake", brake_body(5000)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["available_capacity"].as_f64(), Some(0.0));
    assert_eq!(json["status"], "exceeds_limit");
}

#[tokio::test]
async fn test_debt_brake_rejects_zero_revenue() {
    let app = create_router();
    let (status, json) = post_json(app, "/api/debt-brake", json!({ "revenue": 0 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("revenue"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = create_router();
    let (status, json) = post_json(app, "/api/debt-brake", json!({ "expenses": 10 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_cost_analysis() {
    let app = create_router();
    let (status, json) = post_json(
        app,
        "/api/cost-analysis",
        json!({
            "principal": 100000,
            "interest_rate": 6,
            "term_years": 5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["periods"], 60);
    let payment = json["periodic_payment"].as_f64().unwrap();
    assert!((payment - 1933.28).abs() < 0.01);
    assert!(json.get("schedule").is_none());
}

#[tokio::test]
async fn test_cost_analysis_with_schedule() {
    let app = create_router();
    let (status, json) = post_json(
        app,
        "/api/cost-analysis",
        json!({
            "principal": 12000,
            "interest_rate": 0,
            "term_years": 1,
            "include_schedule": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["schedule"]["payments"].as_array().unwrap().len(), 12);
    assert_eq!(json["yearly"].as_array().unwrap().len(), 1);
    assert_eq!(json["total_interest"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_cost_analysis_rejects_zero_term() {
    let app = create_router();
    let (status, _) = post_json(
        app,
        "/api/cost-analysis",
        json!({ "principal": 1000, "interest_rate": 5, "term_years": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cost_analysis_out_of_range_is_bad_request() {
    let app = create_router();
    let (status, json) = post_json(
        app.clone(),
        "/api/cost-analysis",
        json!({
            "principal": 1000000,
            "interest_rate": 5,
            "term_years": 100,
            "opportunity_rate": 60
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("range"));

    let (status, _) = post_json(
        app.clone(),
        "/api/cost-analysis",
        json!({ "principal": 1000, "interest_rate": 100, "term_years": 100 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // still serving
    let (status, _) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_debt_snowball() {
    let app = create_router();
    let (status, json) = post_json(
        app,
        "/api/debt-snowball",
        json!({
            "debts": [
                { "name": "Overdraft", "balance": 2000, "interest_rate": 12, "minimum_payment": 100 },
                { "name": "Card", "balance": 1000, "interest_rate": 18, "minimum_payment": 50 }
            ],
            "monthly_budget": 500
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let debts = json["debts"].as_array().unwrap();
    assert_eq!(debts[0]["name"], "Card");
    assert_eq!(debts[1]["name"], "Overdraft");
    assert_eq!(json["estimates"][0]["priority"], 1);
    assert!(json["months_to_debt_free"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_debt_snowball_budget_too_small() {
    let app = create_router();
    let (status, _) = post_json(
        app,
        "/api/debt-snowball",
        json!({
            "debts": [{ "name": "Loan", "balance": 100000, "interest_rate": 24 }],
            "monthly_budget": 100
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_covenant_tracking() {
    let app = create_router();
    let (status, json) = post_json(
        app,
        "/api/covenant-tracking",
        json!({
            "total_debt": 500000,
            "ebitda": 100000,
            "current_assets": 300000,
            "current_liabilities": 200000,
            "net_worth": 400000
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["overall_compliant"], false);
    assert_eq!(json["breaches"], 1);
    assert_eq!(json["checks"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_debt_equity() {
    let app = create_router();
    let (status, json) = post_json(
        app,
        "/api/debt-equity",
        json!({
            "total_debt": 1000000,
            "conversion_amount": 250000,
            "equity_value": 750000,
            "interest_rate": 6
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["creditor_stake"].as_f64(), Some(25.0));
    assert_eq!(json["annual_interest_saved"].as_f64(), Some(15000.0));
}

#[tokio::test]
async fn test_funding_guidance() {
    let app = create_router();
    let (status, json) = post_json(
        app,
        "/api/funding-guidance",
        json!({ "company_size": "medium" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
}

// =============================================================================
// HISTORY
// =============================================================================

#[tokio::test]
async fn test_history_lifecycle() {
    let app = create_router();

    let (_, brake) = post_json(app.clone(), "/api/debt-brake", brake_body(1000)).await;
    post_json(
        app.clone(),
        "/api/funding-guidance",
        json!({ "company_size": "large" }),
    )
    .await;

    let (status, list) = get(app.clone(), "/api/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 2);
    assert_eq!(list["records"][0]["calculation"]["kind"], "fundingGuidance");
    assert_eq!(list["records"][0]["session_id"], "test-session");

    let (_, filtered) = get(app.clone(), "/api/history?kind=debtBrake").await;
    assert_eq!(filtered["count"], 1);

    let id = brake["record_id"].as_str().unwrap();
    let (status, record) = get(app.clone(), &format!("/api/history/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["id"], id);

    let (status, _) = delete(app.clone(), &format!("/api/history/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(app.clone(), &format!("/api/history/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, cleared) = delete(app.clone(), "/api/history").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["removed"], 1);
}

#[tokio::test]
async fn test_history_bad_requests() {
    let app = create_router();

    let (status, _) = get(app.clone(), "/api/history/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(app, "/api/history?kind=mortgage").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_insights_report_debt_trend() {
    let app = create_router();
    for debt in [1000, 1000, 1000, 2000, 2000, 2000] {
        post_json(app.clone(), "/api/debt-brake", brake_body(debt)).await;
    }

    let (status, report) = get(app, "/api/insights").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["summary"]["total_calculations"], 6);
    assert_eq!(report["summary"]["most_used_tool"], "debtBrake");
    assert_eq!(report["insights"][0]["title"], "Debt Level Increasing");
    assert_eq!(report["insights"][0]["priority"], "high");
}

#[tokio::test]
async fn test_export() {
    let app = create_router();
    post_json(app.clone(), "/api/debt-brake", brake_body(1000)).await;

    let (status, export) = get(app, "/api/export").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(export["calculations"].as_array().unwrap().len(), 1);
    assert!(export["exported_at"].is_string());
}

#[tokio::test]
async fn test_history_capacity_is_enforced() {
    let tracker = AnalyticsTracker::with_capacity(
        Arc::new(debtkit_history::InMemoryHistoryStore::new()),
        3,
    );
    let app = create_router_with_tracker(tracker, DebtPolicy::default());
    for debt in [100, 200, 300, 400, 500] {
        post_json(app.clone(), "/api/debt-brake", brake_body(debt)).await;
    }

    let (_, list) = get(app, "/api/history?limit=10").await;
    assert_eq!(list["count"], 3);
    assert_eq!(list["records"][0]["calculation"]["input"]["existing_debt"].as_f64(), Some(500.0));
}

#[tokio::test]
async fn test_history_survives_restart_with_redb() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.redb");

    {
        let tracker = AnalyticsTracker::new(Arc::new(RedbHistoryStore::open(&path).unwrap()));
        let app = create_router_with_tracker(tracker, DebtPolicy::default());
        let (status, _) = post_json(app, "/api/debt-brake", brake_body(1000)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let mut config = ServerConfig::default();
    config.history.storage_path = Some(path);
    let server = Server::new(config).unwrap();

    let (status, health) = get(server.router(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["history_backend"], "redb");

    let (_, list) = get(server.router(), "/api/history").await;
    assert_eq!(list["count"], 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_requests_with_redb() {
    let dir = tempfile::tempdir().unwrap();
    let store = RedbHistoryStore::open(dir.path().join("history.redb")).unwrap();
    let tracker = AnalyticsTracker::with_capacity(Arc::new(store), 5);
    let app = create_router_with_tracker(tracker, DebtPolicy::default());

    let handles: Vec<_> = (1..=8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { post_json(app, "/api/debt-brake", brake_body(i * 100)).await })
        })
        .collect();
    for handle in handles {
        let (status, _) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
    }

    let (_, list) = get(app, "/api/history?limit=100").await;
    assert_eq!(list["count"], 5);
}

#[tokio::test]
async fn test_configured_policy_applies() {
    let config = ServerConfig::from_toml("[policy.debt_brake]\nlimit_ratio = 0.01\n").unwrap();
    let server = Server::new(config).unwrap();

    let (status, json) = post_json(server.router(), "/api/debt-brake", brake_body(0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["debt_limit"].as_f64(), Some(10000.0));
}
