//! Reordering.

use tracing::{info, instrument, warn};

use super::GalleryItemManager;
use crate::item::error::GalleryError;
use crate::item::types::{GalleryItem, Placement};
use crate::store::TransactOp;

impl GalleryItemManager {
    /// Give an item a new position.
    ///
    /// The order key is the item's identity, so a move deletes the old record
    /// and inserts a copy under the new key in one store transaction. An
    /// observer sees the item at exactly one of the two positions. A
    /// cancelled transaction is reported as `Storage` and not retried.
    #[instrument(
        skip(self, placement),
        fields(before = ?placement.before, after = ?placement.after)
    )]
    pub async fn move_item(
        &self,
        gallery_id: &str,
        item_id: &str,
        placement: &Placement,
    ) -> Result<GalleryItem, GalleryError> {
        let current = self.get_item(gallery_id, item_id).await?;
        let new_id = self.key_for(gallery_id, placement).await?;
        let moved = current.rekeyed(new_id);

        self.store
            .transact(vec![
                TransactOp::delete(gallery_id, item_id),
                TransactOp::Put(moved.clone()),
            ])
            .await
            .map_err(|e| {
                warn!(error = %e, "Move transaction failed");
                GalleryError::from_store(format!("move failed for item {item_id}"), e)
            })?;
        info!(new_item_id = %moved.item_id, "Moved item");
        Ok(moved)
    }
}
