//! Integration tests for the medication order workflow endpoints
//!
//! These tests drive the full axum stack with in-memory services and verify:
//! 1. Orders are created pending and decided exactly once
//! 2. Approval captures a signature, denial captures a reason
//! 3. Worklist filters and pagination behave consistently
//! 4. Navigation counts track the order lifecycle

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use emr_server::{create_app, EmrServer};

/// Test configuration for order workflow tests
struct TestConfig {
    app: Router,
}

impl TestConfig {
    fn new() -> Self {
        Self {
            app: create_app(EmrServer::new()),
        }
    }
}

/// Helper to build a POST request with a JSON payload
fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

/// Helper to build a GET request
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

/// Helper to create an order through the API and return its JSON form
async fn create_order(app: &Router, medication: &str, dose_mg: &str) -> Value {
    let payload = json!({
        "patientId": Uuid::new_v4(),
        "medication": medication,
        "doseMg": dose_mg,
        "prescriber": "Dr. Alvarez",
        "instructions": "Observed dosing"
    });

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/orders", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();
    response_data["data"].clone()
}

#[tokio::test]
async fn test_create_order_returns_pending_order() {
    let config = TestConfig::new();

    let patient_id = Uuid::new_v4();
    let payload = json!({
        "patientId": patient_id,
        "medication": "methadone",
        "doseMg": "80",
        "prescriber": "Dr. Alvarez"
    });

    let response = config
        .app
        .clone()
        .oneshot(post_json("/api/v1/orders", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(response_data["success"], true);
    assert_eq!(response_data["data"]["status"], "pending");
    assert_eq!(
        response_data["data"]["patientId"],
        patient_id.to_string().as_str()
    );
    assert_eq!(response_data["data"]["doseMg"], "80");
    assert_eq!(response_data["data"]["prescriber"], "Dr. Alvarez");
    assert!(response_data["data"]["id"].is_string());
    assert!(response_data["data"]["signature"].is_null());
    assert!(response_data["data"]["denialReason"].is_null());
}

#[tokio::test]
async fn test_create_order_requires_prescriber() {
    let config = TestConfig::new();

    let payload = json!({
        "patientId": Uuid::new_v4(),
        "medication": "methadone",
        "doseMg": "80",
        "prescriber": "   "
    });

    let response = config
        .app
        .clone()
        .oneshot(post_json("/api/v1/orders", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(error_response["error_type"], "validation_error");
    assert!(error_response["message"]
        .as_str()
        .unwrap()
        .contains("Prescriber"));
    assert!(error_response["error_id"].is_string());
    assert!(error_response["timestamp"].is_string());
}

#[tokio::test]
async fn test_create_order_rejects_zero_dose() {
    let config = TestConfig::new();

    let payload = json!({
        "patientId": Uuid::new_v4(),
        "medication": "buprenorphine",
        "doseMg": "0",
        "prescriber": "Dr. Alvarez"
    });

    let response = config
        .app
        .clone()
        .oneshot(post_json("/api/v1/orders", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(error_response["error_type"], "validation_error");
    assert!(error_response["message"].as_str().unwrap().contains("Dose"));
}

#[tokio::test]
async fn test_get_order_returns_created_order() {
    let config = TestConfig::new();

    let order = create_order(&config.app, "methadone", "80").await;
    let order_id = order["id"].as_str().unwrap();

    let response = config
        .app
        .clone()
        .oneshot(get(&format!("/api/v1/orders/{}", order_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(response_data["success"], true);
    assert_eq!(response_data["data"]["id"], order_id);
    assert_eq!(response_data["data"]["medication"], "methadone");
}

#[tokio::test]
async fn test_get_unknown_order_returns_not_found() {
    let config = TestConfig::new();

    let response = config
        .app
        .clone()
        .oneshot(get(&format!("/api/v1/orders/{}", Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(error_response["error_type"], "not_found");
    assert!(error_response["error_id"].is_string());
    assert!(error_response["timestamp"].is_string());
}

#[tokio::test]
async fn test_approve_order_attaches_signature() {
    let config = TestConfig::new();

    let order = create_order(&config.app, "methadone", "80").await;
    let order_id = order["id"].as_str().unwrap();

    let payload = json!({
        "signedBy": "Dr. Chen",
        "credentials": "MD"
    });

    let response = config
        .app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/orders/{}/approve", order_id),
            &payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(response_data["data"]["status"], "approved");
    assert_eq!(response_data["data"]["signature"]["signedBy"], "Dr. Chen");
    assert_eq!(response_data["data"]["signature"]["credentials"], "MD");
    assert!(response_data["data"]["signature"]["signedAt"].is_string());
    assert!(response_data["data"]["denialReason"].is_null());
}

#[tokio::test]
async fn test_deny_order_records_reason() {
    let config = TestConfig::new();

    let order = create_order(&config.app, "buprenorphine", "16").await;
    let order_id = order["id"].as_str().unwrap();

    let payload = json!({
        "reason": "Dose exceeds induction protocol"
    });

    let response = config
        .app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/orders/{}/deny", order_id),
            &payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(response_data["data"]["status"], "denied");
    assert_eq!(
        response_data["data"]["denialReason"],
        "Dose exceeds induction protocol"
    );
    assert!(response_data["data"]["signature"].is_null());
}

#[tokio::test]
async fn test_decided_order_cannot_be_decided_again() {
    let config = TestConfig::new();

    let order = create_order(&config.app, "methadone", "80").await;
    let order_id = order["id"].as_str().unwrap();

    let approve_payload = json!({ "signedBy": "Dr. Chen" });
    let response = config
        .app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/orders/{}/approve", order_id),
            &approve_payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let deny_payload = json!({ "reason": "Changed my mind" });
    let response = config
        .app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/orders/{}/deny", order_id),
            &deny_payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(error_response["error_type"], "conflict");
    assert!(error_response["error_id"].is_string());
}

#[tokio::test]
async fn test_approve_requires_signer_name() {
    let config = TestConfig::new();

    let order = create_order(&config.app, "methadone", "80").await;
    let order_id = order["id"].as_str().unwrap();

    let payload = json!({ "signedBy": "   " });
    let response = config
        .app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/orders/{}/approve", order_id),
            &payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error_response: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(error_response["error_type"], "validation_error");
}

#[tokio::test]
async fn test_deny_requires_reason() {
    let config = TestConfig::new();

    let order = create_order(&config.app, "methadone", "80").await;
    let order_id = order["id"].as_str().unwrap();

    let payload = json!({ "reason": "" });
    let response = config
        .app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/orders/{}/deny", order_id),
            &payload,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_orders_filters_by_status() {
    let config = TestConfig::new();

    let first = create_order(&config.app, "methadone", "80").await;
    create_order(&config.app, "methadone", "90").await;
    create_order(&config.app, "buprenorphine", "16").await;

    let approve_payload = json!({ "signedBy": "Dr. Chen" });
    let response = config
        .app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/orders/{}/approve", first["id"].as_str().unwrap()),
            &approve_payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = config
        .app
        .clone()
        .oneshot(get("/api/v1/orders?status=pending"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    let orders = response_data["data"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|order| order["status"] == "pending"));
    assert_eq!(response_data["metadata"]["total_count"], 2);
}

#[tokio::test]
async fn test_list_orders_filters_by_medication_and_patient() {
    let config = TestConfig::new();

    create_order(&config.app, "methadone", "80").await;
    let bup = create_order(&config.app, "buprenorphine", "16").await;

    let response = config
        .app
        .clone()
        .oneshot(get("/api/v1/orders?medication=buprenorphine"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    let orders = response_data["data"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["medication"], "buprenorphine");

    let patient_id = bup["patientId"].as_str().unwrap();
    let response = config
        .app
        .clone()
        .oneshot(get(&format!("/api/v1/orders?patient_id={}", patient_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    let orders = response_data["data"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["patientId"], patient_id);
}

#[tokio::test]
async fn test_list_orders_paginates() {
    let config = TestConfig::new();

    create_order(&config.app, "methadone", "60").await;
    create_order(&config.app, "methadone", "70").await;
    create_order(&config.app, "methadone", "80").await;

    let response = config
        .app
        .clone()
        .oneshot(get("/api/v1/orders?page=1&page_size=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(response_data["data"].as_array().unwrap().len(), 2);
    assert_eq!(response_data["metadata"]["total_count"], 3);
    assert_eq!(response_data["metadata"]["pagination"]["total_pages"], 2);
    assert_eq!(response_data["metadata"]["pagination"]["has_next"], true);
    assert_eq!(
        response_data["metadata"]["pagination"]["has_previous"],
        false
    );

    let response = config
        .app
        .clone()
        .oneshot(get("/api/v1/orders?page=2&page_size=2"))
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(response_data["data"].as_array().unwrap().len(), 1);
    assert_eq!(response_data["metadata"]["pagination"]["has_next"], false);
    assert_eq!(response_data["metadata"]["pagination"]["has_previous"], true);
}

#[tokio::test]
async fn test_navigation_counts_track_order_lifecycle() {
    let config = TestConfig::new();

    let methadone = create_order(&config.app, "methadone", "80").await;
    create_order(&config.app, "buprenorphine", "16").await;

    let approve_payload = json!({ "signedBy": "Dr. Chen" });
    let response = config
        .app
        .clone()
        .oneshot(post_json(
            &format!(
                "/api/v1/orders/{}/approve",
                methadone["id"].as_str().unwrap()
            ),
            &approve_payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = config
        .app
        .clone()
        .oneshot(get("/api/v1/navigation/counts"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let response_data: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(response_data["success"], true);

    let counts = response_data["data"].as_array().unwrap();
    let count_for = |label: &str| -> u64 {
        counts
            .iter()
            .find(|entry| entry["label"] == label)
            .and_then(|entry| entry["count"].as_u64())
            .unwrap_or_else(|| panic!("missing probe label {label}"))
    };

    assert_eq!(count_for("pending-orders"), 1);
    assert_eq!(count_for("approved-orders"), 1);
    assert_eq!(count_for("denied-orders"), 0);
    assert_eq!(count_for("total-orders"), 2);
    assert_eq!(count_for("pending-buprenorphine-orders"), 1);
    assert_eq!(count_for("qualifying-services"), 6);
    assert_eq!(count_for("non-qualifying-services"), 6);
}

#[tokio::test]
async fn test_malformed_json_returns_bad_request() {
    let config = TestConfig::new();

    let request = Request::builder()
        .uri("/api/v1/orders")
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = config.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
