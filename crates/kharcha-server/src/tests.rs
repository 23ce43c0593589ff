//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use kharcha_core::advisor::{Advisor, AdvisorClient, MockBackend};
use kharcha_core::db::Database;
use kharcha_core::extract::ReceiptExtractor;
use tower::ServiceExt;

fn test_router(advisor: Advisor, config: ServerConfig) -> Router {
    let db = Database::in_memory().unwrap();
    let extractor = ReceiptExtractor::load().unwrap();
    create_router(db, advisor, extractor, None, config)
}

fn setup_test_app() -> Router {
    test_router(
        Advisor::new(Some(AdvisorClient::mock())),
        ServerConfig {
            require_auth: false,
            allowed_origins: vec![],
        },
    )
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, user: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-user-id", user)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str, user: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", user)
        .body(Body::empty())
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app
        .oneshot(get_request("/api/health", "alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["advisor_configured"], true);
}

// ========== Auth ==========

#[tokio::test]
async fn test_auth_required_rejects_missing_header() {
    let app = test_router(Advisor::new(None), ServerConfig::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/expenses")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_accepts_user_header() {
    let app = test_router(Advisor::new(None), ServerConfig::default());

    let response = app
        .oneshot(get_request("/api/expenses", "alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ========== Expenses ==========

#[tokio::test]
async fn test_create_and_list_expense() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            "alice",
            serde_json::json!({
                "amount": 450.0,
                "category": "Food",
                "description": "Dinner"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = get_body_json(response).await;
    assert_eq!(created["amount"], 450.0);
    assert_eq!(created["category"], "Food");
    assert_eq!(created["icon"], "🍔");

    let response = app
        .oneshot(get_request("/api/expenses", "alice"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["expenses"][0]["description"], "Dinner");
}

#[tokio::test]
async fn test_create_expense_validation() {
    let app = setup_test_app();

    // Non-positive amount
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            "alice",
            serde_json::json!({ "amount": 0.0, "category": "Food" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Amount must be greater than zero");

    // Category too short
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            "alice",
            serde_json::json!({ "amount": 100.0, "category": "X" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was written
    let response = app
        .oneshot(get_request("/api/expenses", "alice"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_expenses_are_scoped_per_user() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            "alice",
            serde_json::json!({ "amount": 100.0, "category": "Food" }),
        ))
        .await
        .unwrap();
    let created = get_body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    // Bob sees nothing
    let response = app
        .clone()
        .oneshot(get_request("/api/expenses", "bob"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["total"], 0);

    // Bob cannot delete Alice's expense
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/expenses/{}", id))
                .header("x-user-id", "bob")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Alice can
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/expenses/{}", id))
                .header("x-user-id", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_spending_summary_endpoint() {
    let app = setup_test_app();

    for (amount, category) in [(100.0, "Food"), (700.0, "Transport")] {
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/expenses",
                "alice",
                serde_json::json!({ "amount": amount, "category": category }),
            ))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/expenses/summary", "alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["total"], 800.0);
    assert_eq!(json["count"], 2);
    assert_eq!(json["categories"][0]["category"], "Transport");

    // Bad date rejected
    let response = app
        .oneshot(get_request("/api/expenses/summary?from=yesterday&to=now", "alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Category classification ==========

#[tokio::test]
async fn test_classify_category() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/categories/classify",
            "alice",
            serde_json::json!({ "text": "I bought fuel at the petrol pump" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "Transport");
    assert_eq!(json["preset"], true);
    assert_eq!(json["glyph"], "🚗");

    // Unmatched text stays a custom category with the default glyph
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/categories/classify",
            "alice",
            serde_json::json!({ "text": "xyz123 made-up activity" }),
        ))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "xyz123 made-up activity");
    assert_eq!(json["preset"], false);
    assert_eq!(json["glyph"], "💰");
}

// ========== Receipt extraction ==========

#[tokio::test]
async fn test_extract_receipt() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "text": "HP Petrol Pump\nNozzle 4\nTotal: 2000.00"
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/receipts/extract", "alice", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["amount"], "2000.00");
    assert_eq!(json["confidence"], 95);
    assert_eq!(json["category"], "transport");
    assert_eq!(json["cached"], false);

    // Same text again is served from scan history
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/receipts/extract", "alice", body))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["amount"], "2000.00");
    assert_eq!(json["cached"], true);

    // And shows up in the scan list
    let response = app
        .oneshot(get_request("/api/receipts/scans", "alice"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_extract_receipt_no_amount() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/receipts/extract",
            "alice",
            serde_json::json!({ "text": "thanks for visiting" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["amount"].is_null());
    assert_eq!(json["confidence"], 0);
}

// ========== Advisor ==========

#[tokio::test]
async fn test_advisor_query_remote() {
    let app = setup_test_app();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            "alice",
            serde_json::json!({ "amount": 450.0, "category": "Food" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/advisor/query",
            "alice",
            serde_json::json!({ "question": "Where does my money go?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["source"], "remote");
    assert_eq!(json["model"], "mock");
    assert_eq!(json["num_expenses"], 1);
}

#[tokio::test]
async fn test_advisor_falls_back_to_local_analysis() {
    let app = test_router(
        Advisor::new(Some(AdvisorClient::Mock(MockBackend::failing()))),
        ServerConfig {
            require_auth: false,
            allowed_origins: vec![],
        },
    );

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            "alice",
            serde_json::json!({ "amount": 450.0, "category": "Food" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/advisor/query",
            "alice",
            serde_json::json!({ "question": "What was my biggest expense?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["source"], "local");
    assert!(json["answer"]
        .as_str()
        .unwrap()
        .contains("Your biggest expense is ₹450.00"));
}

#[tokio::test]
async fn test_advisor_rejects_empty_question() {
    let app = setup_test_app();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            "alice",
            serde_json::json!({ "amount": 450.0, "category": "Food" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/advisor/query",
            "alice",
            serde_json::json!({ "question": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Question cannot be empty");
}

#[tokio::test]
async fn test_advisor_requires_expenses() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/advisor/query",
            "alice",
            serde_json::json!({ "question": "How much did I spend?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "No expenses provided to analyze");
}
