//! Read, update, delete and list operations.

use tracing::{debug, info, instrument};

use super::GalleryItemManager;
use crate::item::error::GalleryError;
use crate::item::types::{GalleryItem, ItemPatch};

impl GalleryItemManager {
    /// Fetch one item.
    #[instrument(skip(self))]
    pub async fn get_item(
        &self,
        gallery_id: &str,
        item_id: &str,
    ) -> Result<GalleryItem, GalleryError> {
        let item = self
            .store
            .get(gallery_id, item_id)
            .await
            .map_err(|e| {
                GalleryError::from_store(format!("failed to get item {item_id}"), e)
            })?
            .ok_or_else(|| GalleryError::not_found(gallery_id, item_id))?;
        item.check_integrity(gallery_id, item_id)
            .map_err(|reason| GalleryError::storage(format!("invalid stored item: {reason}")))?;
        Ok(item)
    }

    /// All items of a gallery in display order.
    #[instrument(skip(self))]
    pub async fn list_items(&self, gallery_id: &str) -> Result<Vec<GalleryItem>, GalleryError> {
        let mut items = self.store.range_query(gallery_id).await.map_err(|e| {
            GalleryError::from_store(format!("failed to list items of gallery {gallery_id}"), e)
        })?;
        if !self.store.ordered_scan() {
            items.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        }
        debug!(count = items.len(), "Listed items");
        Ok(items)
    }

    /// Items whose photos have all been processed, in display order.
    #[instrument(skip(self))]
    pub async fn list_public_items(
        &self,
        gallery_id: &str,
    ) -> Result<Vec<GalleryItem>, GalleryError> {
        let mut items = self.list_items(gallery_id).await?;
        items.retain(GalleryItem::is_fully_processed);
        Ok(items)
    }

    /// Change non-key fields and return the updated record.
    #[instrument(skip(self, patch))]
    pub async fn update_item(
        &self,
        gallery_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> Result<GalleryItem, GalleryError> {
        if patch.is_empty() {
            return Err(GalleryError::validation("no updates provided"));
        }
        let item = self
            .store
            .conditional_update(gallery_id, item_id, patch)
            .await
            .map_err(|e| {
                GalleryError::from_conditional_store(
                    gallery_id,
                    item_id,
                    format!("failed to update item {item_id}"),
                    e,
                )
            })?;
        info!("Updated item");
        Ok(item)
    }

    /// Remove an item. Deleting an item that does not exist succeeds.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, gallery_id: &str, item_id: &str) -> Result<(), GalleryError> {
        self.store.delete(gallery_id, item_id).await.map_err(|e| {
            GalleryError::from_store(format!("failed to delete item {item_id}"), e)
        })?;
        info!("Deleted item");
        Ok(())
    }
}
