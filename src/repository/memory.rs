//! In-process store holding both tables behind one lock. Enforces the same reference rules
//! as the PostgreSQL schema: the inventory link must point at a stored catalog entry, at most
//! one inventory record per catalog entry, and deleting a catalog entry clears the link.

use super::{CatalogEntryRepository, InventoryRecordRepository, Repository};
use crate::domain::{CatalogEntry, Entity, EntityId, InventoryRecord};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    catalog_entries: BTreeMap<EntityId, CatalogEntry>,
    inventory_records: BTreeMap<EntityId, InventoryRecord>,
    last_catalog_entry_id: EntityId,
    last_inventory_record_id: EntityId,
}

impl Tables {
    fn check_catalog_link(&self, record: &InventoryRecord) -> Result<(), AppError> {
        let Some(catalog_entry_id) = record.catalog_entry_id else {
            return Ok(());
        };
        if !self.catalog_entries.contains_key(&catalog_entry_id) {
            return Err(AppError::Constraint(format!(
                "catalog entry {} does not exist",
                catalog_entry_id
            )));
        }
        let taken = self
            .inventory_records
            .values()
            .any(|other| other.catalog_entry_id == Some(catalog_entry_id) && other.id != record.id);
        if taken {
            return Err(AppError::Constraint(format!(
                "catalog entry {} already backs an inventory record",
                catalog_entry_id
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::StoreUnavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::StoreUnavailable("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl Repository<CatalogEntry> for MemoryStore {
    async fn save(&self, entity: CatalogEntry) -> Result<CatalogEntry, AppError> {
        let mut tables = self.write()?;
        let stored = match entity.id {
            Some(id) => {
                if !tables.catalog_entries.contains_key(&id) {
                    return Err(AppError::NotFound {
                        entity: CatalogEntry::ENTITY_NAME,
                        id,
                    });
                }
                entity
            }
            None => {
                tables.last_catalog_entry_id += 1;
                entity.with_id(tables.last_catalog_entry_id)
            }
        };
        if let Some(id) = stored.id {
            tables.catalog_entries.insert(id, stored.clone());
        }
        Ok(stored)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<CatalogEntry>, AppError> {
        Ok(self.read()?.catalog_entries.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<CatalogEntry>, AppError> {
        Ok(self.read()?.catalog_entries.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, AppError> {
        Ok(self.read()?.catalog_entries.contains_key(&id))
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<(), AppError> {
        let mut tables = self.write()?;
        if tables.catalog_entries.remove(&id).is_some() {
            for record in tables.inventory_records.values_mut() {
                if record.catalog_entry_id == Some(id) {
                    record.catalog_entry_id = None;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogEntryRepository for MemoryStore {
    async fn find_all_without_inventory(&self) -> Result<Vec<CatalogEntry>, AppError> {
        let tables = self.read()?;
        let Tables {
            catalog_entries,
            inventory_records,
            ..
        } = &*tables;
        Ok(catalog_entries
            .values()
            .filter(|entry| {
                !inventory_records
                    .values()
                    .any(|record| record.catalog_entry_id.is_some() && record.catalog_entry_id == entry.id)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Repository<InventoryRecord> for MemoryStore {
    async fn save(&self, entity: InventoryRecord) -> Result<InventoryRecord, AppError> {
        let mut tables = self.write()?;
        if let Some(id) = entity.id {
            if !tables.inventory_records.contains_key(&id) {
                return Err(AppError::NotFound {
                    entity: InventoryRecord::ENTITY_NAME,
                    id,
                });
            }
        }
        tables.check_catalog_link(&entity)?;
        let stored = match entity.id {
            Some(_) => entity,
            None => {
                tables.last_inventory_record_id += 1;
                entity.with_id(tables.last_inventory_record_id)
            }
        };
        if let Some(id) = stored.id {
            tables.inventory_records.insert(id, stored.clone());
        }
        Ok(stored)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<InventoryRecord>, AppError> {
        Ok(self.read()?.inventory_records.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<InventoryRecord>, AppError> {
        Ok(self.read()?.inventory_records.values().cloned().collect())
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, AppError> {
        Ok(self.read()?.inventory_records.contains_key(&id))
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<(), AppError> {
        self.write()?.inventory_records.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl InventoryRecordRepository for MemoryStore {
    async fn find_by_catalog_entry_id(
        &self,
        catalog_entry_id: EntityId,
    ) -> Result<Option<InventoryRecord>, AppError> {
        Ok(self
            .read()?
            .inventory_records
            .values()
            .find(|record| record.catalog_entry_id == Some(catalog_entry_id))
            .cloned())
    }
}
