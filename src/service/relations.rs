//! Catalog filtering and the explicit lookups across the catalog/inventory link.

use crate::domain::{CatalogEntry, CatalogFilter, Entity, EntityId, InventoryRecord};
use crate::error::AppError;
use crate::repository::{CatalogEntryRepository, InventoryRecordRepository};

pub struct RelationService;

impl RelationService {
    pub async fn list_catalog_entries(
        catalog: &dyn CatalogEntryRepository,
        filter: Option<CatalogFilter>,
    ) -> Result<Vec<CatalogEntry>, AppError> {
        match filter {
            Some(CatalogFilter::InventoryIsNull) => catalog.find_all_without_inventory().await,
            None => catalog.find_all().await,
        }
    }

    /// Catalog entry referenced by an inventory record. An unlinked record is `NotFound`
    /// for `catalogEntry` keyed by the record id.
    pub async fn catalog_entry_of(
        inventory: &dyn InventoryRecordRepository,
        catalog: &dyn CatalogEntryRepository,
        inventory_record_id: EntityId,
    ) -> Result<CatalogEntry, AppError> {
        let record = inventory
            .find_by_id(inventory_record_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: InventoryRecord::ENTITY_NAME,
                id: inventory_record_id,
            })?;
        let catalog_entry_id = record.catalog_entry_id.ok_or(AppError::NotFound {
            entity: CatalogEntry::ENTITY_NAME,
            id: inventory_record_id,
        })?;
        catalog
            .find_by_id(catalog_entry_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: CatalogEntry::ENTITY_NAME,
                id: catalog_entry_id,
            })
    }

    /// Inventory record backed by a catalog entry.
    pub async fn inventory_record_of(
        catalog: &dyn CatalogEntryRepository,
        inventory: &dyn InventoryRecordRepository,
        catalog_entry_id: EntityId,
    ) -> Result<InventoryRecord, AppError> {
        if !catalog.exists_by_id(catalog_entry_id).await? {
            return Err(AppError::NotFound {
                entity: CatalogEntry::ENTITY_NAME,
                id: catalog_entry_id,
            });
        }
        inventory
            .find_by_catalog_entry_id(catalog_entry_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: InventoryRecord::ENTITY_NAME,
                id: catalog_entry_id,
            })
    }
}
