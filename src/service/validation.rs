//! Request validation from the payloads' declared rules.

use crate::error::AppError;
use validator::Validate;

pub struct RequestValidator;

impl RequestValidator {
    /// Create/replace payloads declare `required` on mandatory fields; patch payloads
    /// declare only range rules, so absent patch fields always pass.
    pub fn validate<T: Validate>(body: &T) -> Result<(), AppError> {
        body.validate().map_err(AppError::Validation)
    }
}
