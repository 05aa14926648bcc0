//! Inventory-specific endpoints.

use crate::domain::EntityId;
use crate::error::AppError;
use crate::response;
use crate::service::RelationService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};

pub async fn catalog_entry(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    tracing::debug!(inventory_record_id = id, "REST request to get catalog entry of inventory record");
    let entry =
        RelationService::catalog_entry_of(&*state.inventory_records, &*state.catalog_entries, id).await?;
    Ok(response::ok(entry))
}
