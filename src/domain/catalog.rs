//! Medication catalog entry: name, optional description, non-negative price.

use super::{same_identity, Entity, EntityId, Identified};
use crate::error::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use validator::{Validate, ValidationError};

/// Stored catalog entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        CatalogEntry {
            id: None,
            name: name.into(),
            description: None,
            price,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Identified for CatalogEntry {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id, other.id)
    }
}

impl Hash for CatalogEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Self::ENTITY_NAME.hash(state);
    }
}

/// Body of POST and PUT. Required fields are optional here so that omission is a
/// validation failure rather than a decode failure.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryPayload {
    pub id: Option<EntityId>,
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(
        required(message = "price is required"),
        custom(function = "non_negative_price")
    )]
    pub price: Option<Decimal>,
}

impl Identified for CatalogEntryPayload {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

/// Body of PATCH. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryPatch {
    pub id: Option<EntityId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(custom(function = "non_negative_price"))]
    pub price: Option<Decimal>,
}

impl Identified for CatalogEntryPatch {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("price must not be negative".into());
        return Err(err);
    }
    Ok(())
}

impl Entity for CatalogEntry {
    const ENTITY_NAME: &'static str = "catalogEntry";

    type Payload = CatalogEntryPayload;
    type Patch = CatalogEntryPatch;

    fn from_payload(payload: CatalogEntryPayload) -> Result<Self, AppError> {
        Ok(CatalogEntry {
            id: payload.id,
            name: payload.name.ok_or_else(|| AppError::missing_field("name"))?,
            description: payload.description,
            price: payload.price.ok_or_else(|| AppError::missing_field("price"))?,
        })
    }

    fn merge(&mut self, patch: CatalogEntryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Named selectors accepted by `GET /catalog-entries?filter=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogFilter {
    /// Entries that no inventory record references.
    InventoryIsNull,
}

impl CatalogFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "inventory-is-null" => Some(CatalogFilter::InventoryIsNull),
            _ => None,
        }
    }
}
