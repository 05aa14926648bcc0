//! Resource routes for catalog entries and inventory records.

use crate::domain::{CatalogEntry, InventoryRecord};
use crate::handlers::entity::{create, delete as delete_handler, list, partial_update, read, update};
use crate::handlers::{catalog, inventory};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/catalog-entries",
            get(catalog::list).post(create::<CatalogEntry>),
        )
        .route(
            "/catalog-entries/:id",
            get(read::<CatalogEntry>)
                .put(update::<CatalogEntry>)
                .patch(partial_update::<CatalogEntry>)
                .delete(delete_handler::<CatalogEntry>),
        )
        .route(
            "/catalog-entries/:id/inventory-record",
            get(catalog::inventory_record),
        )
        .route(
            "/inventory-records",
            get(list::<InventoryRecord>).post(create::<InventoryRecord>),
        )
        .route(
            "/inventory-records/:id",
            get(read::<InventoryRecord>)
                .put(update::<InventoryRecord>)
                .patch(partial_update::<InventoryRecord>)
                .delete(delete_handler::<InventoryRecord>),
        )
        .route(
            "/inventory-records/:id/catalog-entry",
            get(inventory::catalog_entry),
        )
        .with_state(state)
}
