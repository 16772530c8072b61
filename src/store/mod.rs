//! The item store adapter.
//!
//! [`ItemStore`] is the narrow capability interface the gallery manager
//! persists through: items are partitioned by gallery id and keyed by their
//! order key. Backends hold no business rules beyond the record constraints
//! in [`GalleryItem::check_constraints`].

pub mod error;
pub mod json_file;
pub mod memory;
mod table;

pub use error::StoreError;
pub use json_file::JsonFileItemStore;
pub use memory::MemoryItemStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::item::types::{GalleryItem, ItemPatch};

/// One write inside an atomic [`ItemStore::transact`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactOp {
    /// Insert a record; the key must be free.
    Put(GalleryItem),
    /// Remove a record; the key must exist.
    Delete { gallery_id: String, item_id: String },
}

impl TransactOp {
    #[must_use]
    pub fn delete(gallery_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        TransactOp::Delete {
            gallery_id: gallery_id.into(),
            item_id: item_id.into(),
        }
    }
}

/// Partitioned key/value storage with range scans and multi-key transactions.
///
/// Implementations must be `Send + Sync`; one instance is shared by every
/// request.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Read one record. `Ok(None)` when absent.
    async fn get(
        &self,
        gallery_id: &str,
        item_id: &str,
    ) -> Result<Option<GalleryItem>, StoreError>;

    /// Insert a new record. Fails with a condition failure if the key is taken.
    async fn put(&self, item: &GalleryItem) -> Result<(), StoreError>;

    /// Apply `patch` to an existing record and return the full new record.
    /// Fails with a condition failure if the record does not exist.
    async fn conditional_update(
        &self,
        gallery_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> Result<GalleryItem, StoreError>;

    /// Atomically add one to `processed_count` of an existing record.
    async fn increment_processed(
        &self,
        gallery_id: &str,
        item_id: &str,
    ) -> Result<GalleryItem, StoreError>;

    /// Remove a record. Removing an absent key succeeds.
    async fn delete(&self, gallery_id: &str, item_id: &str) -> Result<(), StoreError>;

    /// All records of one gallery.
    async fn range_query(&self, gallery_id: &str) -> Result<Vec<GalleryItem>, StoreError>;

    /// Apply every op or none. Preconditions are checked for all ops first.
    async fn transact(&self, ops: Vec<TransactOp>) -> Result<(), StoreError>;

    /// Whether [`range_query`](ItemStore::range_query) returns records in key order.
    fn ordered_scan(&self) -> bool {
        true
    }
}
