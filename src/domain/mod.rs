//! Entity records, their request payloads, and identity semantics.

pub mod catalog;
pub mod inventory;

pub use catalog::{CatalogEntry, CatalogEntryPatch, CatalogEntryPayload, CatalogFilter};
pub use inventory::{InventoryRecord, InventoryRecordPatch, InventoryRecordPayload};

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use validator::Validate;

/// Store-assigned synthetic key.
pub type EntityId = i64;

/// Anything that may carry a synthetic identifier: stored records and request bodies.
pub trait Identified {
    fn id(&self) -> Option<EntityId>;
}

/// Identity comparison: equal only when both ids are set and match.
pub fn same_identity(a: Option<EntityId>, b: Option<EntityId>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

/// A persisted record type with its create/replace payload and merge-patch payload.
pub trait Entity: Identified + Clone + Debug + Serialize + Send + Sync + 'static {
    /// Name used in error details and alert headers.
    const ENTITY_NAME: &'static str;

    type Payload: Identified + Validate + DeserializeOwned + Debug + Send + 'static;
    type Patch: Identified + Validate + DeserializeOwned + Debug + Send + 'static;

    /// Build a record from a validated payload. The payload id is carried over.
    fn from_payload(payload: Self::Payload) -> Result<Self, AppError>;

    /// Overlay the fields present in `patch`; absent fields keep their stored value.
    fn merge(&mut self, patch: Self::Patch);

    /// Copy of this record with the store-assigned id.
    fn with_id(self, id: EntityId) -> Self;
}
