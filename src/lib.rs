//! Pharmacy inventory: REST backend for medication catalog entries and inventory records.

pub mod config;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use config::{LogFormat, Settings, StoreBackend};
pub use domain::{CatalogEntry, EntityId, InventoryRecord};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use repository::{MemoryStore, PgStore};
pub use routes::{app, API_PREFIX};
pub use state::AppState;
pub use store::{connect, ensure_database_exists};
pub use service::{CrudService, RelationService};
