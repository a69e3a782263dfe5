//! HTTP transport tests against a local axum stub of the inventory API.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use shadow_inventory::{
    Endpoint, FetchError, Gateway, HttpTransport, Notifier, Severity, Transport,
};

async fn resolve(Path(id): Path<String>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if id == "42" {
        let status = body["resolution_status"].as_str().unwrap_or("?");
        (
            StatusCode::OK,
            Json(json!({"success": true, "message": format!("Updated to {status}")})),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid resolution status"})),
        )
    }
}

async fn spawn_stub() -> String {
    let router = Router::new()
        .route(
            "/api/summary_stats",
            get(|| async { Json(json!({"total_detected": 7, "linked_spend": 12.5})) }),
        )
        .route(
            "/api/apps",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable") }),
        )
        .route("/api/behavior_insights", get(|| async { "<html>not json</html>" }))
        .route("/api/apps/:id/resolve", post(resolve));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test: bind stub");
    let addr = listener.local_addr().expect("test: stub addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_get_success_decodes_body() {
    let base = spawn_stub().await;
    let transport = HttpTransport::new(base);
    let value = transport
        .get_json(&Endpoint::SummaryStats.path())
        .await
        .expect("test: summary");
    assert_eq!(value["total_detected"], 7);
}

#[tokio::test]
async fn test_get_server_error_is_status_failure() {
    let base = spawn_stub().await;
    let transport = HttpTransport::new(base);
    let err = transport
        .get_json(&Endpoint::Apps.path())
        .await
        .expect_err("test: expected status error");
    assert!(matches!(err, FetchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_get_non_json_body_is_decode_failure() {
    let base = spawn_stub().await;
    let transport = HttpTransport::new(base);
    let err = transport
        .get_json(&Endpoint::BehaviorInsights.path())
        .await
        .expect_err("test: expected decode error");
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[tokio::test]
async fn test_post_sends_resolution_body() {
    let base = spawn_stub().await;
    let transport = HttpTransport::new(base);
    let value = transport
        .post_json(
            &Endpoint::Resolve("42".into()).path(),
            &json!({"resolution_status": "Blocked"}),
        )
        .await
        .expect("test: resolve");
    assert_eq!(value, json!({"success": true, "message": "Updated to Blocked"}));
}

#[tokio::test]
async fn test_post_client_error_carries_server_message() {
    let base = spawn_stub().await;
    let transport = HttpTransport::new(base);
    let err = transport
        .post_json(
            &Endpoint::Resolve("7".into()).path(),
            &json!({"resolution_status": "Nope"}),
        )
        .await
        .expect_err("test: expected status error");
    match err {
        FetchError::Status { status, message, .. } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid resolution status");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("test: bind");
    let addr = listener.local_addr().expect("test: addr");
    drop(listener);

    let transport = HttpTransport::new(format!("http://{addr}"));
    let err = transport
        .get_json(&Endpoint::SummaryStats.path())
        .await
        .expect_err("test: expected network error");
    assert!(matches!(err, FetchError::Network { .. }));
}

#[tokio::test]
async fn test_gateway_notifies_each_failure_once() {
    let base = spawn_stub().await;
    let notifier = Notifier::default();
    let gateway = Gateway::new(Arc::new(HttpTransport::new(base)), notifier.clone());

    assert!(gateway.retrieve(&Endpoint::SummaryStats).await.is_some());
    assert!(gateway.retrieve(&Endpoint::Apps).await.is_none());
    assert!(gateway
        .submit(
            &Endpoint::Resolve("7".into()),
            &json!({"resolution_status": "Nope"})
        )
        .await
        .is_none());

    let history = notifier.history();
    assert_eq!(history.len(), 2);
    assert_eq!(
        history[0].message,
        "Error fetching data from /api/apps. Status: 500"
    );
    assert_eq!(
        history[1].message,
        "API Error on update: Invalid resolution status"
    );
    assert_eq!(notifier.count(Severity::Danger), 2);
}
