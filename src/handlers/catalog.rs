//! Catalog-specific endpoints: filtered listing and the inventory lookup.

use crate::domain::{CatalogFilter, EntityId};
use crate::error::AppError;
use crate::response;
use crate::service::RelationService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub filter: Option<String>,
}

/// `GET /catalog-entries[?filter=inventory-is-null]`. Unknown filters list everything.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Response, AppError> {
    let filter = params.filter.as_deref().and_then(CatalogFilter::parse);
    tracing::debug!(entity = "catalogEntry", ?filter, "REST request to get all");
    let entries = RelationService::list_catalog_entries(&*state.catalog_entries, filter).await?;
    Ok(response::ok(entries))
}

pub async fn inventory_record(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    tracing::debug!(catalog_entry_id = id, "REST request to get inventory record of catalog entry");
    let record =
        RelationService::inventory_record_of(&*state.catalog_entries, &*state.inventory_records, id).await?;
    Ok(response::ok(record))
}
