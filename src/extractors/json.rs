use crate::error::AppError;
use axum::extract::FromRequest;

/// `axum::Json` with malformed or mistyped bodies reported as a 400 error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);
