//! Request extractors whose rejections render as `AppError`.

mod json;
pub use json::Json;
