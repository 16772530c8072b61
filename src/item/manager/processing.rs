//! Callback from the post-upload photo processor.

use tracing::{info, instrument};

use super::GalleryItemManager;
use crate::item::error::GalleryError;
use crate::item::types::GalleryItem;
use crate::staging::StagingKey;

impl GalleryItemManager {
    /// Count one more processed photo for the item the staging key points at.
    #[instrument(skip(self))]
    pub async fn record_processed_photo(
        &self,
        staging_key: &str,
    ) -> Result<GalleryItem, GalleryError> {
        let key: StagingKey = staging_key.parse().map_err(|e| GalleryError::Validation {
            message: format!("unrecognised staging key '{staging_key}'"),
            source: Some(Box::new(e)),
        })?;
        let item = self
            .store
            .increment_processed(&key.gallery_id, &key.item_id)
            .await
            .map_err(|e| {
                GalleryError::from_conditional_store(
                    &key.gallery_id,
                    &key.item_id,
                    format!("failed to record processed photo for item {}", key.item_id),
                    e,
                )
            })?;
        info!(
            item_id = %item.item_id,
            processed = item.processed_count,
            photos = item.photo_refs.len(),
            "Recorded processed photo"
        );
        Ok(item)
    }
}
