//! HTTP handlers for the catalog and inventory resources.

pub mod catalog;
pub mod entity;
pub mod inventory;
pub use entity::Resource;
