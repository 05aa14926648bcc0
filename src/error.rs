//! Typed errors and HTTP mapping.

use crate::domain::EntityId;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key}: invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("invalid database url: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("unreadable request body: {0}")]
    InvalidBody(String),
    #[error("a new {entity} cannot already have an id")]
    ConflictingIdentifier { entity: &'static str },
    #[error("invalid id: {entity} body has no id")]
    MissingIdentifier { entity: &'static str },
    #[error("invalid id: path id {path_id} does not match {entity} id {body_id}")]
    IdentifierMismatch {
        entity: &'static str,
        path_id: EntityId,
        body_id: EntityId,
    },
    #[error("{entity} {id} not found")]
    UnknownIdentifier { entity: &'static str, id: EntityId },
    #[error("not found: {entity} {id}")]
    NotFound { entity: &'static str, id: EntityId },
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// Validation failure for a single required field.
    pub fn missing_field(field: &'static str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new("required"));
        AppError::Validation(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidBody(_)
            | AppError::ConflictingIdentifier { .. }
            | AppError::MissingIdentifier { .. }
            | AppError::IdentifierMismatch { .. }
            | AppError::UnknownIdentifier { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Constraint(_)
            | AppError::StoreUnavailable(_)
            | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidBody(_) => "invalid_body",
            AppError::ConflictingIdentifier { .. } => "idexists",
            AppError::MissingIdentifier { .. } => "idnull",
            AppError::IdentifierMismatch { .. } => "idinvalid",
            AppError::UnknownIdentifier { .. } => "idnotfound",
            AppError::NotFound { .. } => "not_found",
            AppError::Constraint(_) => "constraint_violation",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::Db(_) => "database_error",
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            AppError::Validation(errors) => Some(validation_details(errors)),
            AppError::ConflictingIdentifier { entity }
            | AppError::MissingIdentifier { entity }
            | AppError::IdentifierMismatch { entity, .. }
            | AppError::UnknownIdentifier { entity, .. }
            | AppError::NotFound { entity, .. } => Some(json!({ "entityName": entity })),
            _ => None,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

fn validation_details(errors: &ValidationErrors) -> Value {
    let mut fields: Vec<(String, Value)> = Vec::new();
    for (field, errs) in errors.field_errors() {
        for e in errs.iter() {
            fields.push((
                field.to_string(),
                json!({
                    "field": field.to_string(),
                    "code": e.code.to_string(),
                    "message": e.message.as_ref().map(|m| m.to_string()),
                }),
            ));
        }
    }
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    json!({ "fieldErrors": fields.into_iter().map(|(_, v)| v).collect::<Vec<_>>() })
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Constraint(_) => tracing::warn!(error = %self, "store rejected write"),
            _ if status.is_server_error() => tracing::error!(error = %self, "request failed"),
            _ => tracing::debug!(error = %self, "request rejected"),
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
                details: self.details(),
            },
        };
        (status, Json(body)).into_response()
    }
}
