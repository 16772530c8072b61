//! The gallery item manager.
//!
//! Orchestrates order-key generation, the item store and the upload stager to
//! create, read, update, delete, list and move items. Collaborators are
//! injected at construction; the manager keeps no state of its own and takes
//! no locks, leaving consistency under concurrent writers to the store's
//! conditional writes and transactions.

mod create_ops;
mod crud_ops;
mod move_ops;
mod processing;

use std::sync::Arc;
use std::time::Duration;

use super::error::GalleryError;
use super::types::Placement;
use crate::ordering::generate_key;
use crate::staging::{validate_ttl, UploadStager, DEFAULT_UPLOAD_TTL};
use crate::store::ItemStore;

/// Public contract consumed by the boundary layer.
pub struct GalleryItemManager {
    store: Arc<dyn ItemStore>,
    stager: Arc<dyn UploadStager>,
    upload_ttl: Duration,
}

impl GalleryItemManager {
    pub fn new(store: Arc<dyn ItemStore>, stager: Arc<dyn UploadStager>) -> Self {
        Self {
            store,
            stager,
            upload_ttl: DEFAULT_UPLOAD_TTL,
        }
    }

    /// Use `ttl` for every issued upload target.
    pub fn with_upload_ttl(mut self, ttl: Duration) -> Result<Self, GalleryError> {
        validate_ttl(ttl).map_err(|e| GalleryError::Validation {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;
        self.upload_ttl = ttl;
        Ok(self)
    }

    #[must_use]
    pub fn upload_ttl(&self) -> Duration {
        self.upload_ttl
    }

    /// Key for an explicit placement; `after` is the lower bound.
    fn key_between(placement: &Placement) -> Result<String, GalleryError> {
        Ok(generate_key(
            placement.after.as_deref(),
            placement.before.as_deref(),
        )?)
    }

    /// Key placing an item at `placement`, or after the current last item
    /// when both sides are open.
    async fn key_for(
        &self,
        gallery_id: &str,
        placement: &Placement,
    ) -> Result<String, GalleryError> {
        if !placement.is_open() {
            return Self::key_between(placement);
        }
        let items = self.store.range_query(gallery_id).await.map_err(|e| {
            GalleryError::from_store(format!("failed to scan gallery {gallery_id}"), e)
        })?;
        let last = items.iter().map(|item| item.item_id.as_str()).max();
        Ok(generate_key(last, None)?)
    }
}
