#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use pharmacy_inventory::{app, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub const APP_NAME: &str = "pharmacyInventoryApp";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub fn router() -> Router {
    app(AppState::in_memory(APP_NAME), 1024 * 1024)
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    send_with_type(router, method, uri, body, "application/json").await
}

pub async fn send_with_type(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    content_type: &str,
) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse { status, headers, body }
}

pub async fn count(router: &Router, collection: &str) -> usize {
    let response = send(router, Method::GET, &format!("/api/{}", collection), None).await;
    assert_eq!(response.status, StatusCode::OK);
    response.body.as_array().map(|a| a.len()).unwrap_or(0)
}
