//! PostgreSQL-backed repositories over `catalog_entry` and `inventory_record`.

use super::{CatalogEntryRepository, InventoryRecordRepository, Repository};
use crate::domain::{CatalogEntry, Entity, EntityId, InventoryRecord};
use crate::error::AppError;
use crate::sql::{self, Table};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

pub const CATALOG_ENTRY_TABLE: &str = "catalog_entry";
pub const INVENTORY_RECORD_TABLE: &str = "inventory_record";
const CATALOG_ENTRY_COLUMNS: &[&str] = &["name", "description", "price"];
const INVENTORY_RECORD_COLUMNS: &[&str] = &["quantity_in_stock", "catalog_entry_id"];
const CATALOG_LINK_COLUMN: &str = "catalog_entry_id";

#[derive(FromRow)]
struct CatalogEntryRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
}

impl From<CatalogEntryRow> for CatalogEntry {
    fn from(row: CatalogEntryRow) -> Self {
        CatalogEntry {
            id: Some(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
        }
    }
}

#[derive(FromRow)]
struct InventoryRecordRow {
    id: i64,
    quantity_in_stock: i32,
    catalog_entry_id: Option<i64>,
}

impl From<InventoryRecordRow> for InventoryRecord {
    fn from(row: InventoryRecordRow) -> Self {
        InventoryRecord {
            id: Some(row.id),
            quantity_in_stock: row.quantity_in_stock,
            catalog_entry_id: row.catalog_entry_id,
        }
    }
}

/// Unique and foreign-key violations are constraint failures; anything else stays a database error.
fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() || db.is_foreign_key_violation() {
            return AppError::Constraint(db.message().to_string());
        }
    }
    AppError::Db(e)
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    catalog_entries: Table,
    inventory_records: Table,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgStore {
            pool,
            catalog_entries: Table::new(schema, CATALOG_ENTRY_TABLE, CATALOG_ENTRY_COLUMNS),
            inventory_records: Table::new(schema, INVENTORY_RECORD_TABLE, INVENTORY_RECORD_COLUMNS),
        }
    }

    async fn fetch_by_id<R>(&self, table: &Table, id: EntityId) -> Result<Option<R>, AppError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = sql::select_by_id(table);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn fetch_all<R>(&self, sql: &str) -> Result<Vec<R>, AppError>
    where
        R: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, R>(sql).fetch_all(&self.pool).await?)
    }

    async fn exists(&self, table: &Table, id: EntityId) -> Result<bool, AppError> {
        let sql = sql::exists_by_id(table);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn delete(&self, table: &Table, id: EntityId) -> Result<(), AppError> {
        let sql = sql::delete_by_id(table);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;
        Ok(())
    }
}

#[async_trait]
impl Repository<CatalogEntry> for PgStore {
    async fn save(&self, entity: CatalogEntry) -> Result<CatalogEntry, AppError> {
        let table = &self.catalog_entries;
        let row = match entity.id {
            None => {
                let sql = sql::insert(table);
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as::<_, CatalogEntryRow>(&sql)
                    .bind(&entity.name)
                    .bind(&entity.description)
                    .bind(entity.price)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_write_error)?
            }
            Some(id) => {
                let sql = sql::update_by_id(table);
                tracing::debug!(sql = %sql, id, "query");
                sqlx::query_as::<_, CatalogEntryRow>(&sql)
                    .bind(&entity.name)
                    .bind(&entity.description)
                    .bind(entity.price)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_write_error)?
                    .ok_or(AppError::NotFound {
                        entity: CatalogEntry::ENTITY_NAME,
                        id,
                    })?
            }
        };
        Ok(row.into())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<CatalogEntry>, AppError> {
        let row: Option<CatalogEntryRow> = self.fetch_by_id(&self.catalog_entries, id).await?;
        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<CatalogEntry>, AppError> {
        let rows: Vec<CatalogEntryRow> = self.fetch_all(&sql::select_all(&self.catalog_entries)).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, AppError> {
        self.exists(&self.catalog_entries, id).await
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<(), AppError> {
        self.delete(&self.catalog_entries, id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CatalogEntryRepository for PgStore {
    async fn find_all_without_inventory(&self) -> Result<Vec<CatalogEntry>, AppError> {
        let sql = sql::select_unreferenced(&self.catalog_entries, &self.inventory_records, CATALOG_LINK_COLUMN);
        let rows: Vec<CatalogEntryRow> = self.fetch_all(&sql).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl Repository<InventoryRecord> for PgStore {
    async fn save(&self, entity: InventoryRecord) -> Result<InventoryRecord, AppError> {
        let table = &self.inventory_records;
        let row = match entity.id {
            None => {
                let sql = sql::insert(table);
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as::<_, InventoryRecordRow>(&sql)
                    .bind(entity.quantity_in_stock)
                    .bind(entity.catalog_entry_id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(map_write_error)?
            }
            Some(id) => {
                let sql = sql::update_by_id(table);
                tracing::debug!(sql = %sql, id, "query");
                sqlx::query_as::<_, InventoryRecordRow>(&sql)
                    .bind(entity.quantity_in_stock)
                    .bind(entity.catalog_entry_id)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_write_error)?
                    .ok_or(AppError::NotFound {
                        entity: InventoryRecord::ENTITY_NAME,
                        id,
                    })?
            }
        };
        Ok(row.into())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<InventoryRecord>, AppError> {
        let row: Option<InventoryRecordRow> = self.fetch_by_id(&self.inventory_records, id).await?;
        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<InventoryRecord>, AppError> {
        let rows: Vec<InventoryRecordRow> = self.fetch_all(&sql::select_all(&self.inventory_records)).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists_by_id(&self, id: EntityId) -> Result<bool, AppError> {
        self.exists(&self.inventory_records, id).await
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<(), AppError> {
        self.delete(&self.inventory_records, id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl InventoryRecordRepository for PgStore {
    async fn find_by_catalog_entry_id(
        &self,
        catalog_entry_id: EntityId,
    ) -> Result<Option<InventoryRecord>, AppError> {
        let sql = sql::select_by_column(&self.inventory_records, CATALOG_LINK_COLUMN);
        tracing::debug!(sql = %sql, catalog_entry_id, "query");
        let row = sqlx::query_as::<_, InventoryRecordRow>(&sql)
            .bind(catalog_entry_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }
}
