//! Generic resource handlers: create, read, update, partial update, delete, list.

use crate::domain::{CatalogEntry, Entity, EntityId, InventoryRecord};
use crate::error::AppError;
use crate::extractors::Json;
use crate::repository::{CatalogEntryRepository, InventoryRecordRepository, Repository};
use crate::response;
use crate::routes::API_PREFIX;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};

/// An entity exposed as a REST collection under `/api/{PATH}`.
pub trait Resource: Entity {
    const PATH: &'static str;

    type Repo: Repository<Self> + ?Sized;

    fn repository(state: &AppState) -> &Self::Repo;

    fn location_base() -> String {
        format!("{}/{}", API_PREFIX, Self::PATH)
    }
}

impl Resource for CatalogEntry {
    const PATH: &'static str = "catalog-entries";

    type Repo = dyn CatalogEntryRepository;

    fn repository(state: &AppState) -> &Self::Repo {
        &*state.catalog_entries
    }
}

impl Resource for InventoryRecord {
    const PATH: &'static str = "inventory-records";

    type Repo = dyn InventoryRecordRepository;

    fn repository(state: &AppState) -> &Self::Repo {
        &*state.inventory_records
    }
}

fn stored_id<E: Entity>(entity: &E) -> Result<EntityId, AppError> {
    entity.id().ok_or_else(|| {
        AppError::StoreUnavailable(format!("store returned a {} without id", E::ENTITY_NAME))
    })
}

pub async fn create<E: Resource>(
    State(state): State<AppState>,
    Json(payload): Json<E::Payload>,
) -> Result<Response, AppError> {
    tracing::debug!(entity = E::ENTITY_NAME, ?payload, "REST request to save");
    let saved = CrudService::create::<E, _>(E::repository(&state), payload).await?;
    let id = stored_id(&saved)?;
    Ok(response::created(
        &state.application_name,
        E::ENTITY_NAME,
        &E::location_base(),
        id,
        saved,
    ))
}

pub async fn update<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(payload): Json<E::Payload>,
) -> Result<Response, AppError> {
    tracing::debug!(entity = E::ENTITY_NAME, id, ?payload, "REST request to update");
    let saved = CrudService::update::<E, _>(E::repository(&state), id, payload).await?;
    Ok(response::updated(&state.application_name, E::ENTITY_NAME, id, saved))
}

/// Accepts `application/json` and `application/merge-patch+json` bodies. Undecodable
/// bodies are `InvalidBody`.
pub async fn partial_update<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<E::Patch>,
) -> Result<Response, AppError> {
    tracing::debug!(entity = E::ENTITY_NAME, id, ?patch, "REST request to partially update");
    let saved = CrudService::partial_update::<E, _>(E::repository(&state), id, patch).await?;
    Ok(response::updated(&state.application_name, E::ENTITY_NAME, id, saved))
}

pub async fn read<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    tracing::debug!(entity = E::ENTITY_NAME, id, "REST request to get");
    let entity = CrudService::read::<E, _>(E::repository(&state), id).await?;
    Ok(response::ok(entity))
}

pub async fn list<E: Resource>(State(state): State<AppState>) -> Result<Response, AppError> {
    tracing::debug!(entity = E::ENTITY_NAME, "REST request to get all");
    let all = CrudService::list::<E, _>(E::repository(&state)).await?;
    Ok(response::ok(all))
}

pub async fn delete<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> Result<Response, AppError> {
    tracing::debug!(entity = E::ENTITY_NAME, id, "REST request to delete");
    CrudService::delete::<E, _>(E::repository(&state), id).await?;
    Ok(response::deleted(&state.application_name, E::ENTITY_NAME, id))
}
