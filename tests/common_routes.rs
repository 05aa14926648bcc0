mod common;

use axum::http::{Method, StatusCode};
use common::{router, send};

#[tokio::test]
async fn health_reports_ok() {
    let response = send(&router(), Method::GET, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn ready_with_memory_store() {
    let response = send(&router(), Method::GET, "/ready", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["database"], "ok");
}

#[tokio::test]
async fn version_names_the_package() {
    let response = send(&router(), Method::GET, "/version", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "pharmacy-inventory");
}
