//! Item creation and upload-target issuance.

use futures::future::try_join_all;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::GalleryItemManager;
use crate::item::error::GalleryError;
use crate::item::types::{CreatedItem, GalleryItem, Geometry, NewItem, Placement};
use crate::staging::{StagingError, StagingKey};

impl GalleryItemManager {
    /// Store a new item at `placement` and issue one upload target per photo.
    ///
    /// Targets are issued only after the record is durable. If issuance then
    /// fails the record is kept and a `Storage` error is returned; the item
    /// exists without usable upload targets.
    #[instrument(skip(self, new_item, placement), fields(photos = new_item.geometry.len()))]
    pub async fn create_item(
        &self,
        gallery_id: &str,
        new_item: NewItem,
        placement: &Placement,
    ) -> Result<CreatedItem, GalleryError> {
        validate_new_item(gallery_id, &new_item)?;
        let item_id = self.key_for(gallery_id, placement).await?;
        let item = GalleryItem {
            gallery_id: gallery_id.to_string(),
            item_id,
            photo_refs: new_item
                .geometry
                .iter()
                .map(|_| Uuid::new_v4().to_string())
                .collect(),
            captured_at: new_item.captured_at,
            processed_count: 0,
            location: new_item.location,
        };

        self.store.put(&item).await.map_err(|e| {
            GalleryError::from_store(
                format!("failed to create item {} in gallery {gallery_id}", item.item_id),
                e,
            )
        })?;
        info!(item_id = %item.item_id, "Created item");

        let upload_targets = self.issue_upload_targets(&item, &new_item.geometry).await?;
        Ok(CreatedItem {
            item,
            upload_targets,
        })
    }

    async fn issue_upload_targets(
        &self,
        item: &GalleryItem,
        geometry: &[Geometry],
    ) -> Result<Vec<String>, GalleryError> {
        let stored_but = |e: StagingError| {
            warn!(
                item_id = %item.item_id,
                error = %e,
                "Item stored but upload targets could not be issued"
            );
            GalleryError::from_staging(
                format!(
                    "item {} was stored but its upload targets could not be issued",
                    item.item_id
                ),
                e,
            )
        };
        let keys = item
            .photo_refs
            .iter()
            .zip(geometry)
            .map(|(photo_id, geometry)| {
                StagingKey::new(&item.gallery_id, &item.item_id, photo_id, *geometry)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(stored_but)?;
        try_join_all(
            keys.iter()
                .map(|key| self.stager.issue_upload_target(key, self.upload_ttl)),
        )
        .await
        .map_err(stored_but)
    }
}

fn validate_new_item(gallery_id: &str, new_item: &NewItem) -> Result<(), GalleryError> {
    if gallery_id.is_empty() || gallery_id.contains('/') {
        return Err(GalleryError::validation(format!(
            "invalid gallery id '{gallery_id}'"
        )));
    }
    if new_item.geometry.is_empty() {
        return Err(GalleryError::validation(
            "an item needs at least one photo geometry",
        ));
    }
    if let Some(index) = new_item
        .geometry
        .iter()
        .position(|g| g.width == 0 || g.height == 0)
    {
        return Err(GalleryError::validation(format!(
            "geometry {index} has zero width or height"
        )));
    }
    if new_item.captured_at.trim().is_empty() {
        return Err(GalleryError::validation("capturedAt is required"));
    }
    Ok(())
}
