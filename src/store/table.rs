//! In-memory table shared by the store backends.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{StoreError, TransactOp};
use crate::item::types::{GalleryItem, ItemPatch};

type Partition = BTreeMap<String, GalleryItem>;

/// Galleries keyed by id, each an ordered map from order key to record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    galleries: BTreeMap<String, Partition>,
}

impl Table {
    #[must_use]
    pub fn get(&self, gallery_id: &str, item_id: &str) -> Option<&GalleryItem> {
        self.galleries.get(gallery_id)?.get(item_id)
    }

    pub fn insert(&mut self, item: &GalleryItem) -> Result<(), StoreError> {
        item.check_constraints().map_err(StoreError::Constraint)?;
        let partition = self.galleries.entry(item.gallery_id.clone()).or_default();
        if partition.contains_key(&item.item_id) {
            return Err(StoreError::occupied(&item.gallery_id, &item.item_id));
        }
        partition.insert(item.item_id.clone(), item.clone());
        Ok(())
    }

    pub fn update(
        &mut self,
        gallery_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> Result<GalleryItem, StoreError> {
        let current = self
            .galleries
            .get_mut(gallery_id)
            .and_then(|p| p.get_mut(item_id))
            .ok_or_else(|| StoreError::missing(gallery_id, item_id))?;
        let mut next = current.clone();
        next.apply_patch(patch).map_err(StoreError::Constraint)?;
        current.clone_from(&next);
        Ok(next)
    }

    pub fn increment_processed(
        &mut self,
        gallery_id: &str,
        item_id: &str,
    ) -> Result<GalleryItem, StoreError> {
        let current = self
            .galleries
            .get_mut(gallery_id)
            .and_then(|p| p.get_mut(item_id))
            .ok_or_else(|| StoreError::missing(gallery_id, item_id))?;
        let mut next = current.clone();
        next.processed_count = next
            .processed_count
            .checked_add(1)
            .ok_or_else(|| StoreError::Constraint("processedCount overflow".to_string()))?;
        next.check_constraints().map_err(StoreError::Constraint)?;
        current.clone_from(&next);
        Ok(next)
    }

    /// Returns whether a record was removed.
    pub fn remove(&mut self, gallery_id: &str, item_id: &str) -> bool {
        let Some(partition) = self.galleries.get_mut(gallery_id) else {
            return false;
        };
        let removed = partition.remove(item_id).is_some();
        if partition.is_empty() {
            self.galleries.remove(gallery_id);
        }
        removed
    }

    #[must_use]
    pub fn scan(&self, gallery_id: &str) -> Vec<GalleryItem> {
        self.galleries
            .get(gallery_id)
            .map(|p| p.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Apply `ops` to copies of the touched partitions and swap them in only
    /// when every op succeeded.
    pub fn transact(&mut self, ops: &[TransactOp]) -> Result<(), StoreError> {
        let touched: BTreeSet<&str> = ops
            .iter()
            .map(|op| match op {
                TransactOp::Put(item) => item.gallery_id.as_str(),
                TransactOp::Delete { gallery_id, .. } => gallery_id.as_str(),
            })
            .collect();
        let mut scratch = Table {
            galleries: touched
                .iter()
                .filter_map(|id| {
                    self.galleries
                        .get(*id)
                        .map(|p| ((*id).to_string(), p.clone()))
                })
                .collect(),
        };
        for op in ops {
            let applied = match op {
                TransactOp::Put(item) => scratch.insert(item),
                TransactOp::Delete {
                    gallery_id,
                    item_id,
                } => {
                    if scratch.remove(gallery_id, item_id) {
                        Ok(())
                    } else {
                        Err(StoreError::missing(gallery_id, item_id))
                    }
                }
            };
            applied.map_err(|e| StoreError::TransactionCanceled(Box::new(e)))?;
        }
        for id in touched {
            match scratch.galleries.remove(id) {
                Some(partition) => {
                    self.galleries.insert(id.to_string(), partition);
                }
                None => {
                    self.galleries.remove(id);
                }
            }
        }
        Ok(())
    }
}
