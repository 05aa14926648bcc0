//! Persistence gateway: one generic contract per entity plus the relationship queries.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{PgStore, CATALOG_ENTRY_TABLE, INVENTORY_RECORD_TABLE};

use crate::domain::{CatalogEntry, EntityId, InventoryRecord};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Send + 'static,
{
    /// Insert when the entity has no id (the store assigns one), otherwise overwrite the
    /// stored record with that id. Overwriting an id that is no longer stored is `NotFound`.
    async fn save(&self, entity: E) -> Result<E, AppError>;

    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, AppError>;

    /// All records, ascending by id.
    async fn find_all(&self) -> Result<Vec<E>, AppError>;

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, AppError>;

    /// Absent ids are not an error.
    async fn delete_by_id(&self, id: EntityId) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
pub trait CatalogEntryRepository: Repository<CatalogEntry> {
    /// Entries that no inventory record references, ascending by id.
    async fn find_all_without_inventory(&self) -> Result<Vec<CatalogEntry>, AppError>;
}

#[async_trait]
pub trait InventoryRecordRepository: Repository<InventoryRecord> {
    async fn find_by_catalog_entry_id(
        &self,
        catalog_entry_id: EntityId,
    ) -> Result<Option<InventoryRecord>, AppError>;
}
