//! In-process item store.
//!
//! [`MemoryItemStore`] keeps every gallery in an ordered map behind one
//! `RwLock`, so range scans come back in key order and a transaction is
//! applied while holding the write lock.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::table::Table;
use super::{ItemStore, StoreError, TransactOp};
use crate::item::types::{GalleryItem, ItemPatch};

/// An [`ItemStore`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    table: RwLock<Table>,
}

impl MemoryItemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in one gallery.
    pub async fn len(&self, gallery_id: &str) -> usize {
        self.table.read().await.scan(gallery_id).len()
    }

    pub async fn is_empty(&self, gallery_id: &str) -> bool {
        self.len(gallery_id).await == 0
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn get(
        &self,
        gallery_id: &str,
        item_id: &str,
    ) -> Result<Option<GalleryItem>, StoreError> {
        Ok(self.table.read().await.get(gallery_id, item_id).cloned())
    }

    #[instrument(skip(self, item), fields(gallery_id = %item.gallery_id, item_id = %item.item_id))]
    async fn put(&self, item: &GalleryItem) -> Result<(), StoreError> {
        self.table.write().await.insert(item)?;
        debug!("Inserted item");
        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn conditional_update(
        &self,
        gallery_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> Result<GalleryItem, StoreError> {
        self.table.write().await.update(gallery_id, item_id, patch)
    }

    #[instrument(skip(self))]
    async fn increment_processed(
        &self,
        gallery_id: &str,
        item_id: &str,
    ) -> Result<GalleryItem, StoreError> {
        self.table
            .write()
            .await
            .increment_processed(gallery_id, item_id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, gallery_id: &str, item_id: &str) -> Result<(), StoreError> {
        let removed = self.table.write().await.remove(gallery_id, item_id);
        debug!(removed, "Deleted item");
        Ok(())
    }

    async fn range_query(&self, gallery_id: &str) -> Result<Vec<GalleryItem>, StoreError> {
        Ok(self.table.read().await.scan(gallery_id))
    }

    #[instrument(skip(self, ops), fields(ops = ops.len()))]
    async fn transact(&self, ops: Vec<TransactOp>) -> Result<(), StoreError> {
        self.table.write().await.transact(&ops)
    }
}
