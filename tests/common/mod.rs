//! Common test utilities

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use photo_gallery::staging::{StagingError, StagingKey, UploadStager};
use photo_gallery::{
    GalleryItem, GalleryItemManager, Geometry, JsonFileItemStore, MemoryItemStore, NewItem,
};
use tempfile::TempDir;

pub const GALLERY: &str = "test-gallery";

/// Create a temporary directory for testing
#[allow(dead_code)] // Test utility for integration tests
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Upload stager that records every key it was asked for.
#[derive(Default)]
pub struct RecordingStager {
    pub keys: Mutex<Vec<String>>,
}

#[async_trait]
impl UploadStager for RecordingStager {
    async fn issue_upload_target(
        &self,
        key: &StagingKey,
        _ttl: Duration,
    ) -> Result<String, StagingError> {
        self.keys.lock().unwrap().push(key.to_string());
        Ok(format!("https://uploads.test/{key}"))
    }
}

/// Manager over a fresh in-memory store.
#[allow(dead_code)] // Test utility for integration tests
pub fn memory_manager() -> (GalleryItemManager, Arc<RecordingStager>) {
    let stager = Arc::new(RecordingStager::default());
    let manager = GalleryItemManager::new(Arc::new(MemoryItemStore::new()), stager.clone());
    (manager, stager)
}

/// Manager over a JSON file store at `path`.
#[allow(dead_code)] // Test utility for integration tests
pub async fn json_manager(path: &Path) -> GalleryItemManager {
    let store = JsonFileItemStore::open(path)
        .await
        .expect("Failed to open JSON store");
    GalleryItemManager::new(Arc::new(store), Arc::new(RecordingStager::default()))
}

/// Item with `photos` photos and the given location.
pub fn sample_item(photos: u32, location: &str) -> NewItem {
    NewItem {
        geometry: (0..photos)
            .map(|i| Geometry::new(i, i, 640, 480))
            .collect(),
        captured_at: "2024-08-24T10:00:00.000Z".to_string(),
        location: location.to_string(),
    }
}

/// Locations of the gallery in display order.
#[allow(dead_code)] // Test utility for integration tests
pub async fn locations(manager: &GalleryItemManager) -> Vec<String> {
    manager
        .list_items(GALLERY)
        .await
        .expect("list failed")
        .into_iter()
        .map(|item: GalleryItem| item.location)
        .collect()
}
