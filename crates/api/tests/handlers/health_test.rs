use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_index() {
    let ctx = TestContext::new(json!({ "schedules": [] }));

    let response = ctx.server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "message": "API is working!" }));
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new(json!({ "schedules": [] }));

    let health = ctx.server.get("/health").await;
    assert_eq!(health.json::<Value>(), json!({ "status": "ok" }));

    let version = ctx.server.get("/version").await;
    assert_eq!(
        version.json::<Value>()["version"],
        json!(env!("CARGO_PKG_VERSION"))
    );
}
