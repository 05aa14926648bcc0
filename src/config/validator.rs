//! Settings validation: identifiers and header names must be safe to splice into SQL and HTTP.

use crate::config::Settings;
use crate::error::ConfigError;
use regex::Regex;

const SCHEMA_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";
const APPLICATION_NAME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9_-]*$";

fn check_pattern(key: &'static str, value: &str, pattern: &str) -> Result<(), ConfigError> {
    let re = Regex::new(pattern).map_err(|e| ConfigError::Invalid {
        key,
        value: pattern.to_string(),
        reason: e.to_string(),
    })?;
    if !re.is_match(value) {
        return Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: format!("must match {}", pattern),
        });
    }
    Ok(())
}

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    check_pattern("INVENTORY_SCHEMA", &settings.schema, SCHEMA_PATTERN)?;
    check_pattern("APPLICATION_NAME", &settings.application_name, APPLICATION_NAME_PATTERN)?;
    if settings.max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "DATABASE_MAX_CONNECTIONS",
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }
    if settings.body_limit_bytes == 0 {
        return Err(ConfigError::Invalid {
            key: "REQUEST_BODY_LIMIT",
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}
