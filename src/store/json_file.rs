//! Item store persisted as one JSON document.
//!
//! Every mutation holds an exclusive advisory lock on a sibling `.lock` file
//! from the read of the document until its replacement, so writers in other
//! processes (or other handles on the same path) are serialised. The document
//! is replaced by persisting a uniquely named temp file over it, so readers
//! never observe a half-written table and need no lock.

use async_trait::async_trait;
use fd_lock::RwLock as FileLock;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{debug, instrument};

use super::table::Table;
use super::{ItemStore, StoreError, TransactOp};
use crate::item::types::{GalleryItem, ItemPatch};

/// An [`ItemStore`] backed by a JSON file on the local filesystem.
#[derive(Debug)]
pub struct JsonFileItemStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileItemStore {
    /// Open the store at `path`, creating parent directories as needed.
    /// The file itself is created on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(".lock");
        debug!(path = %path.display(), "JsonFileItemStore opened");
        Ok(Self {
            path,
            lock_path: PathBuf::from(lock_path),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Table, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => parse_table(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Table::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Run `change` against the current document under the file lock and
    /// persist the result. Nothing is written when `change` fails.
    ///
    /// Locking and file I/O block, so they run on the blocking pool.
    async fn mutate<T, F>(&self, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Table) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.path.clone();
        let lock_path = self.lock_path.clone();
        tokio::task::spawn_blocking(move || -> Result<T, StoreError> {
            let lock_file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&lock_path)?;
            let mut lock = FileLock::new(lock_file);
            let _guard = lock.write()?;
            let mut table = read_table(&path)?;
            let out = change(&mut table)?;
            write_table(&path, &table)?;
            Ok(out)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("store write task failed: {e}")))?
    }
}

fn parse_table(bytes: &[u8]) -> Result<Table, StoreError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Table::default());
    }
    Ok(serde_json::from_slice(bytes)?)
}

fn read_table(path: &Path) -> Result<Table, StoreError> {
    match std::fs::read(path) {
        Ok(bytes) => parse_table(&bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Table::default()),
        Err(e) => Err(e.into()),
    }
}

fn write_table(path: &Path, table: &Table) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&serde_json::to_vec_pretty(table)?)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl ItemStore for JsonFileItemStore {
    async fn get(
        &self,
        gallery_id: &str,
        item_id: &str,
    ) -> Result<Option<GalleryItem>, StoreError> {
        Ok(self.load().await?.get(gallery_id, item_id).cloned())
    }

    #[instrument(
        skip(self, item),
        fields(gallery_id = %item.gallery_id, item_id = %item.item_id)
    )]
    async fn put(&self, item: &GalleryItem) -> Result<(), StoreError> {
        let item = item.clone();
        self.mutate(move |table| table.insert(&item)).await
    }

    #[instrument(skip(self, patch))]
    async fn conditional_update(
        &self,
        gallery_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> Result<GalleryItem, StoreError> {
        let (gallery_id, item_id, patch) =
            (gallery_id.to_string(), item_id.to_string(), patch.clone());
        self.mutate(move |table| table.update(&gallery_id, &item_id, &patch))
            .await
    }

    #[instrument(skip(self))]
    async fn increment_processed(
        &self,
        gallery_id: &str,
        item_id: &str,
    ) -> Result<GalleryItem, StoreError> {
        let (gallery_id, item_id) = (gallery_id.to_string(), item_id.to_string());
        self.mutate(move |table| table.increment_processed(&gallery_id, &item_id))
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, gallery_id: &str, item_id: &str) -> Result<(), StoreError> {
        let (gallery_id, item_id) = (gallery_id.to_string(), item_id.to_string());
        let removed = self
            .mutate(move |table| Ok(table.remove(&gallery_id, &item_id)))
            .await?;
        debug!(removed, "Deleted item");
        Ok(())
    }

    async fn range_query(&self, gallery_id: &str) -> Result<Vec<GalleryItem>, StoreError> {
        Ok(self.load().await?.scan(gallery_id))
    }

    #[instrument(skip(self, ops), fields(ops = ops.len()))]
    async fn transact(&self, ops: Vec<TransactOp>) -> Result<(), StoreError> {
        self.mutate(move |table| table.transact(&ops)).await
    }
}
