//! Inventory record: stock quantity plus an optional unique reference to a catalog entry.

use super::{same_identity, Entity, EntityId, Identified};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use validator::Validate;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: Option<EntityId>,
    pub quantity_in_stock: i32,
    /// Owning side of the one-to-one link. Resolved only through an explicit lookup.
    pub catalog_entry_id: Option<EntityId>,
}

impl InventoryRecord {
    pub fn new(quantity_in_stock: i32) -> Self {
        InventoryRecord {
            id: None,
            quantity_in_stock,
            catalog_entry_id: None,
        }
    }

    pub fn catalog_entry(mut self, catalog_entry_id: EntityId) -> Self {
        self.catalog_entry_id = Some(catalog_entry_id);
        self
    }
}

impl Identified for InventoryRecord {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl PartialEq for InventoryRecord {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id, other.id)
    }
}

impl Hash for InventoryRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Self::ENTITY_NAME.hash(state);
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecordPayload {
    pub id: Option<EntityId>,
    #[validate(required(message = "quantityInStock is required"))]
    pub quantity_in_stock: Option<i32>,
    pub catalog_entry_id: Option<EntityId>,
}

impl Identified for InventoryRecordPayload {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecordPatch {
    pub id: Option<EntityId>,
    pub quantity_in_stock: Option<i32>,
    pub catalog_entry_id: Option<EntityId>,
}

impl Identified for InventoryRecordPatch {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl Entity for InventoryRecord {
    const ENTITY_NAME: &'static str = "inventoryRecord";

    type Payload = InventoryRecordPayload;
    type Patch = InventoryRecordPatch;

    fn from_payload(payload: InventoryRecordPayload) -> Result<Self, AppError> {
        Ok(InventoryRecord {
            id: payload.id,
            quantity_in_stock: payload
                .quantity_in_stock
                .ok_or_else(|| AppError::missing_field("quantityInStock"))?,
            catalog_entry_id: payload.catalog_entry_id,
        })
    }

    fn merge(&mut self, patch: InventoryRecordPatch) {
        if let Some(quantity) = patch.quantity_in_stock {
            self.quantity_in_stock = quantity;
        }
        if let Some(catalog_entry_id) = patch.catalog_entry_id {
            self.catalog_entry_id = Some(catalog_entry_id);
        }
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_id_only() {
        let a = InventoryRecord {
            id: Some(1),
            ..InventoryRecord::new(1)
        };
        let b = InventoryRecord {
            id: Some(1),
            ..InventoryRecord::new(2)
        };
        assert_eq!(a, b);
        let unsaved = InventoryRecord::new(1);
        assert_ne!(unsaved, unsaved.clone());
        assert_ne!(a, InventoryRecord::new(1));
    }

    #[test]
    fn quantity_is_required() {
        let payload: InventoryRecordPayload = serde_json::from_str(r#"{"quantityInStock": null}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
        assert!(InventoryRecord::from_payload(payload).is_err());
    }

    #[test]
    fn zero_quantity_is_a_value_not_an_absence() {
        let mut stored = InventoryRecord {
            id: Some(4),
            ..InventoryRecord::new(1)
        };
        let patch: InventoryRecordPatch = serde_json::from_str(r#"{"id": 4, "quantityInStock": 0}"#).unwrap();
        stored.merge(patch);
        assert_eq!(stored.quantity_in_stock, 0);
    }

    #[test]
    fn merge_with_only_id_keeps_quantity_and_link() {
        let mut stored = InventoryRecord {
            id: Some(4),
            ..InventoryRecord::new(1).catalog_entry(9)
        };
        stored.merge(InventoryRecordPatch {
            id: Some(4),
            ..Default::default()
        });
        assert_eq!(stored.quantity_in_stock, 1);
        assert_eq!(stored.catalog_entry_id, Some(9));
    }
}
