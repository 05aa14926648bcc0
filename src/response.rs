//! Success response helpers: status, JSON body, `Location` and alert headers.

use crate::domain::EntityId;
use axum::{
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alert {
    Created,
    Updated,
    Deleted,
}

impl Alert {
    fn verb(self) -> &'static str {
        match self {
            Alert::Created => "created",
            Alert::Updated => "updated",
            Alert::Deleted => "deleted",
        }
    }
}

/// `x-{app}-alert: {app}.{entity}.{verb}` and `x-{app}-params: {id}`. Names or values that
/// cannot be encoded are left out.
pub fn alert_headers(application_name: &str, entity_name: &str, alert: Alert, id: EntityId) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let app = application_name.to_lowercase();
    let message = format!("{}.{}.{}", application_name, entity_name, alert.verb());
    let pairs = [
        (format!("x-{}-alert", app), message),
        (format!("x-{}-params", app), id.to_string()),
    ];
    for (name, value) in pairs {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            headers.insert(name, value);
        }
    }
    headers
}

fn location(path: &str, id: EntityId) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!("{}/{}", path, id)).ok()
}

pub fn created<T: Serialize>(
    application_name: &str,
    entity_name: &str,
    resource_path: &str,
    id: EntityId,
    body: T,
) -> Response {
    let mut headers = alert_headers(application_name, entity_name, Alert::Created, id);
    if let Some(value) = location(resource_path, id) {
        headers.insert(header::LOCATION, value);
    }
    (StatusCode::CREATED, headers, Json(body)).into_response()
}

pub fn updated<T: Serialize>(application_name: &str, entity_name: &str, id: EntityId, body: T) -> Response {
    let headers = alert_headers(application_name, entity_name, Alert::Updated, id);
    (StatusCode::OK, headers, Json(body)).into_response()
}

pub fn deleted(application_name: &str, entity_name: &str, id: EntityId) -> Response {
    let headers = alert_headers(application_name, entity_name, Alert::Deleted, id);
    (StatusCode::NO_CONTENT, headers).into_response()
}

pub fn ok<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_headers_are_keyed_by_application() {
        let headers = alert_headers("pharmacyInventoryApp", "catalogEntry", Alert::Created, 7);
        assert_eq!(
            headers.get("x-pharmacyinventoryapp-alert").unwrap(),
            "pharmacyInventoryApp.catalogEntry.created"
        );
        assert_eq!(headers.get("x-pharmacyinventoryapp-params").unwrap(), "7");
    }

    #[test]
    fn unencodable_names_are_skipped() {
        let headers = alert_headers("bad app", "catalogEntry", Alert::Deleted, 1);
        assert!(headers.is_empty());
    }

    #[test]
    fn created_sets_location() {
        let response = created("app", "catalogEntry", "/api/catalog-entries", 3, serde_json::json!({}));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/catalog-entries/3"
        );
        assert_eq!(response.headers().get("x-app-alert").unwrap(), "app.catalogEntry.created");
    }
}
