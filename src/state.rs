//! Shared application state for all routes.

use crate::repository::{CatalogEntryRepository, InventoryRecordRepository, MemoryStore, PgStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog_entries: Arc<dyn CatalogEntryRepository>,
    pub inventory_records: Arc<dyn InventoryRecordRepository>,
    /// Prefix of the `x-{app}-alert` / `x-{app}-params` response headers.
    pub application_name: Arc<str>,
}

impl AppState {
    pub fn postgres(store: PgStore, application_name: &str) -> Self {
        let store = Arc::new(store);
        AppState {
            catalog_entries: store.clone(),
            inventory_records: store,
            application_name: Arc::from(application_name),
        }
    }

    pub fn in_memory(application_name: &str) -> Self {
        let store = Arc::new(MemoryStore::new());
        AppState {
            catalog_entries: store.clone(),
            inventory_records: store,
            application_name: Arc::from(application_name),
        }
    }
}
