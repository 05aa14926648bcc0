//! Generic CRUD rules shared by every entity: identity checks, existence checks and
//! merge-patch, executed against a repository.

use super::RequestValidator;
use crate::domain::{Entity, EntityId, Identified};
use crate::error::AppError;
use crate::repository::Repository;

pub struct CrudService;

impl CrudService {
    /// Validate and insert. A body that already carries an id is rejected before any write.
    pub async fn create<E, R>(repo: &R, payload: E::Payload) -> Result<E, AppError>
    where
        E: Entity,
        R: Repository<E> + ?Sized,
    {
        RequestValidator::validate(&payload)?;
        if payload.id().is_some() {
            return Err(AppError::ConflictingIdentifier {
                entity: E::ENTITY_NAME,
            });
        }
        let entity = E::from_payload(payload)?;
        repo.save(entity).await
    }

    /// Replace the stored record wholesale.
    pub async fn update<E, R>(repo: &R, id: EntityId, payload: E::Payload) -> Result<E, AppError>
    where
        E: Entity,
        R: Repository<E> + ?Sized,
    {
        RequestValidator::validate(&payload)?;
        Self::check_identity::<E>(id, payload.id())?;
        Self::ensure_exists::<E, R>(repo, id).await?;
        let entity = E::from_payload(payload)?;
        repo.save(entity).await
    }

    /// Overlay the present fields of `patch` onto the stored record. A target that disappears
    /// after the existence check is reported as `NotFound`.
    pub async fn partial_update<E, R>(repo: &R, id: EntityId, patch: E::Patch) -> Result<E, AppError>
    where
        E: Entity,
        R: Repository<E> + ?Sized,
    {
        RequestValidator::validate(&patch)?;
        Self::check_identity::<E>(id, patch.id())?;
        Self::ensure_exists::<E, R>(repo, id).await?;
        let mut existing = repo.find_by_id(id).await?.ok_or(AppError::NotFound {
            entity: E::ENTITY_NAME,
            id,
        })?;
        existing.merge(patch);
        repo.save(existing).await
    }

    pub async fn read<E, R>(repo: &R, id: EntityId) -> Result<E, AppError>
    where
        E: Entity,
        R: Repository<E> + ?Sized,
    {
        repo.find_by_id(id).await?.ok_or(AppError::NotFound {
            entity: E::ENTITY_NAME,
            id,
        })
    }

    pub async fn list<E, R>(repo: &R) -> Result<Vec<E>, AppError>
    where
        E: Entity,
        R: Repository<E> + ?Sized,
    {
        repo.find_all().await
    }

    /// Idempotent: deleting an absent id succeeds.
    pub async fn delete<E, R>(repo: &R, id: EntityId) -> Result<(), AppError>
    where
        E: Entity,
        R: Repository<E> + ?Sized,
    {
        repo.delete_by_id(id).await
    }

    fn check_identity<E: Entity>(path_id: EntityId, body_id: Option<EntityId>) -> Result<(), AppError> {
        let body_id = body_id.ok_or(AppError::MissingIdentifier {
            entity: E::ENTITY_NAME,
        })?;
        if body_id != path_id {
            return Err(AppError::IdentifierMismatch {
                entity: E::ENTITY_NAME,
                path_id,
                body_id,
            });
        }
        Ok(())
    }

    async fn ensure_exists<E, R>(repo: &R, id: EntityId) -> Result<(), AppError>
    where
        E: Entity,
        R: Repository<E> + ?Sized,
    {
        if !repo.exists_by_id(id).await? {
            return Err(AppError::UnknownIdentifier {
                entity: E::ENTITY_NAME,
                id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CatalogEntry, CatalogEntryPatch, CatalogEntryPayload, InventoryRecord, InventoryRecordPatch,
        InventoryRecordPayload,
    };
    use crate::repository::{CatalogEntryRepository, InventoryRecordRepository, MemoryStore};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use rust_decimal::Decimal;

    /// Reports every id as present but loads nothing, as when a concurrent delete lands
    /// between the existence check and the load.
    struct VanishingCatalog;

    #[async_trait]
    impl Repository<CatalogEntry> for VanishingCatalog {
        async fn save(&self, entity: CatalogEntry) -> Result<CatalogEntry, AppError> {
            Ok(entity)
        }

        async fn find_by_id(&self, _id: EntityId) -> Result<Option<CatalogEntry>, AppError> {
            Ok(None)
        }

        async fn find_all(&self) -> Result<Vec<CatalogEntry>, AppError> {
            Ok(Vec::new())
        }

        async fn exists_by_id(&self, _id: EntityId) -> Result<bool, AppError> {
            Ok(true)
        }

        async fn delete_by_id(&self, _id: EntityId) -> Result<(), AppError> {
            Ok(())
        }
    }

    fn catalog_payload() -> CatalogEntryPayload {
        CatalogEntryPayload {
            id: None,
            name: Some("AAAAAAAAAA".into()),
            description: Some("AAAAAAAAAA".into()),
            price: Some(Decimal::ONE),
        }
    }

    async fn count(repo: &dyn InventoryRecordRepository) -> usize {
        repo.find_all().await.unwrap().len()
    }

    #[tokio::test]
    async fn create_returns_stored_record_with_fresh_id() {
        let store = MemoryStore::new();
        let repo: &dyn InventoryRecordRepository = &store;
        let created = CrudService::create::<InventoryRecord, _>(
            repo,
            InventoryRecordPayload {
                quantity_in_stock: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(created.quantity_in_stock, 1);
        let id = created.id.unwrap();
        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.quantity_in_stock, 1);
    }

    #[tokio::test]
    async fn create_with_id_writes_nothing() {
        let store = MemoryStore::new();
        let repo: &dyn InventoryRecordRepository = &store;
        let err = CrudService::create::<InventoryRecord, _>(
            repo,
            InventoryRecordPayload {
                id: Some(1),
                quantity_in_stock: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::ConflictingIdentifier { .. }));
        assert_eq!(count(repo).await, 0);
    }

    #[tokio::test]
    async fn create_without_quantity_writes_nothing() {
        let store = MemoryStore::new();
        let repo: &dyn InventoryRecordRepository = &store;
        let err = CrudService::create::<InventoryRecord, _>(repo, InventoryRecordPayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(count(repo).await, 0);
    }

    #[tokio::test]
    async fn update_checks_identity_before_existence() {
        let store = MemoryStore::new();
        let repo: &dyn CatalogEntryRepository = &store;
        let created = CrudService::create::<CatalogEntry, _>(repo, catalog_payload()).await.unwrap();
        let id = created.id.unwrap();

        let err = CrudService::update::<CatalogEntry, _>(repo, id, catalog_payload())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingIdentifier { .. }));

        let mismatched = CatalogEntryPayload {
            id: Some(id + 1),
            ..catalog_payload()
        };
        let err = CrudService::update::<CatalogEntry, _>(repo, id, mismatched)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::IdentifierMismatch { .. }));

        let unknown = CatalogEntryPayload {
            id: Some(i64::MAX),
            ..catalog_payload()
        };
        let err = CrudService::update::<CatalogEntry, _>(repo, i64::MAX, unknown)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownIdentifier { .. }));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_wholesale() {
        let store = MemoryStore::new();
        let repo: &dyn CatalogEntryRepository = &store;
        let created = CrudService::create::<CatalogEntry, _>(repo, catalog_payload()).await.unwrap();
        let id = created.id.unwrap();
        let replacement = CatalogEntryPayload {
            id: Some(id),
            name: Some("BBBBBBBBBB".into()),
            description: None,
            price: Some(Decimal::TWO),
        };
        let updated = CrudService::update::<CatalogEntry, _>(repo, id, replacement).await.unwrap();
        assert_eq!(updated.name, "BBBBBBBBBB");
        assert_eq!(updated.description, None);
        assert_eq!(updated.price, Decimal::TWO);
    }

    #[tokio::test]
    async fn partial_update_with_only_id_changes_nothing() {
        let store = MemoryStore::new();
        let repo: &dyn InventoryRecordRepository = &store;
        let created = repo.save(InventoryRecord::new(1)).await.unwrap();
        let id = created.id.unwrap();
        let patched = CrudService::partial_update::<InventoryRecord, _>(
            repo,
            id,
            InventoryRecordPatch {
                id: Some(id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(patched.quantity_in_stock, 1);
        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().quantity_in_stock, 1);
    }

    #[tokio::test]
    async fn partial_update_rejects_negative_price() {
        let store = MemoryStore::new();
        let repo: &dyn CatalogEntryRepository = &store;
        let created = CrudService::create::<CatalogEntry, _>(repo, catalog_payload()).await.unwrap();
        let id = created.id.unwrap();
        let err = CrudService::partial_update::<CatalogEntry, _>(
            repo,
            id,
            CatalogEntryPatch {
                id: Some(id),
                price: Some(Decimal::NEGATIVE_ONE),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().price, Decimal::ONE);
    }

    #[tokio::test]
    async fn partial_update_of_vanished_target_is_not_found() {
        let err = CrudService::partial_update::<CatalogEntry, _>(
            &VanishingCatalog,
            5,
            CatalogEntryPatch {
                id: Some(5),
                name: Some("BBBBBBBBBB".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::NotFound {
                entity: "catalogEntry",
                id: 5
            }
        ));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let store = MemoryStore::new();
        let repo: &dyn CatalogEntryRepository = &store;
        let err = CrudService::read::<CatalogEntry, _>(repo, i64::MAX).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = MemoryStore::new();
        let repo: &dyn CatalogEntryRepository = &store;
        let first = CrudService::create::<CatalogEntry, _>(repo, catalog_payload()).await.unwrap();
        CrudService::create::<CatalogEntry, _>(repo, catalog_payload()).await.unwrap();
        let id = first.id.unwrap();
        CrudService::delete::<CatalogEntry, _>(repo, id).await.unwrap();
        assert_eq!(CrudService::list::<CatalogEntry, _>(repo).await.unwrap().len(), 1);
        CrudService::delete::<CatalogEntry, _>(repo, id).await.unwrap();
        assert_eq!(CrudService::list::<CatalogEntry, _>(repo).await.unwrap().len(), 1);
    }
}
