//! Runtime settings read from the environment (`.env` is loaded by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err("expected postgres or memory".into()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err("expected text or json".into()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub max_connections: u32,
    /// Create the database named in `database_url` when it does not exist.
    pub create_database: bool,
    /// Schema holding the catalog and inventory tables.
    pub schema: String,
    pub store: StoreBackend,
    pub bind_addr: SocketAddr,
    /// Prefix of the alert headers on mutating responses.
    pub application_name: String,
    pub body_limit_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "postgres://localhost/pharmacy_inventory".into(),
            max_connections: 5,
            create_database: true,
            schema: "pharmacy".into(),
            store: StoreBackend::Postgres,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            application_name: "pharmacyInventoryApp".into(),
            body_limit_bytes: 1024 * 1024,
            log_format: LogFormat::Text,
        }
    }
}

fn parse<T>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

fn parse_bool(key: &'static str, raw: String) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "expected a boolean".into(),
        }),
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults. Result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Settings::default();
        if let Some(v) = lookup("DATABASE_URL") {
            s.database_url = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            s.max_connections = parse("DATABASE_MAX_CONNECTIONS", v)?;
        }
        if let Some(v) = lookup("DATABASE_CREATE") {
            s.create_database = parse_bool("DATABASE_CREATE", v)?;
        }
        if let Some(v) = lookup("INVENTORY_SCHEMA") {
            s.schema = v;
        }
        if let Some(v) = lookup("STORE_BACKEND") {
            s.store = parse("STORE_BACKEND", v)?;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            s.bind_addr = parse("BIND_ADDR", v)?;
        }
        if let Some(v) = lookup("APPLICATION_NAME") {
            s.application_name = v;
        }
        if let Some(v) = lookup("REQUEST_BODY_LIMIT") {
            s.body_limit_bytes = parse("REQUEST_BODY_LIMIT", v)?;
        }
        if let Some(v) = lookup("LOG_FORMAT") {
            s.log_format = parse("LOG_FORMAT", v)?;
        }
        super::validate(&s)?;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let s = from(&[]).unwrap();
        assert_eq!(s.schema, "pharmacy");
        assert_eq!(s.store, StoreBackend::Postgres);
        assert_eq!(s.bind_addr.port(), 3000);
        assert_eq!(s.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides_are_parsed() {
        let s = from(&[
            ("STORE_BACKEND", "memory"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("DATABASE_CREATE", "false"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(s.store, StoreBackend::Memory);
        assert_eq!(s.bind_addr.port(), 8080);
        assert_eq!(s.max_connections, 12);
        assert!(!s.create_database);
        assert_eq!(s.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = from(&[("DATABASE_MAX_CONNECTIONS", "many")]).unwrap_err();
        assert!(err.to_string().starts_with("DATABASE_MAX_CONNECTIONS"));
        let err = from(&[("STORE_BACKEND", "redis")]).unwrap_err();
        assert!(err.to_string().starts_with("STORE_BACKEND"));
    }
}
