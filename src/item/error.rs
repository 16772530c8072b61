//! Error taxonomy of the gallery item manager.

use thiserror::Error;

use crate::ordering::KeyError;
use crate::staging::StagingError;
use crate::store::StoreError;

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Every failure the manager reports falls into one of four kinds.
///
/// `InvalidRange`, `Validation` and `NotFound` are caller errors;
/// `Storage` is a server-side failure. The original cause stays attached
/// as the error source.
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Invalid ordering range: {0}")]
    InvalidRange(#[from] KeyError),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    #[error("Item not found: {gallery_id}/{item_id}")]
    NotFound {
        gallery_id: String,
        item_id: String,
        #[source]
        source: Option<Cause>,
    },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Cause>,
    },
}

impl GalleryError {
    pub fn validation(message: impl Into<String>) -> Self {
        GalleryError::Validation {
            message: message.into(),
            source: None,
        }
    }

    pub fn not_found(gallery_id: &str, item_id: &str) -> Self {
        GalleryError::NotFound {
            gallery_id: gallery_id.to_string(),
            item_id: item_id.to_string(),
            source: None,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        GalleryError::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Classify a store failure. Constraint violations become
    /// `Validation`; everything else is `Storage` with `context` as message.
    pub(crate) fn from_store(context: impl Into<String>, err: StoreError) -> Self {
        if err.is_constraint_violation() {
            return GalleryError::Validation {
                message: err.to_string(),
                source: Some(Box::new(err)),
            };
        }
        GalleryError::Storage {
            message: context.into(),
            source: Some(Box::new(err)),
        }
    }

    /// Like [`from_store`](Self::from_store), but a failed existence
    /// condition means the item is gone.
    pub(crate) fn from_conditional_store(
        gallery_id: &str,
        item_id: &str,
        context: impl Into<String>,
        err: StoreError,
    ) -> Self {
        if err.is_condition_failure() {
            return GalleryError::NotFound {
                gallery_id: gallery_id.to_string(),
                item_id: item_id.to_string(),
                source: Some(Box::new(err)),
            };
        }
        Self::from_store(context, err)
    }

    pub(crate) fn from_staging(context: impl Into<String>, err: StagingError) -> Self {
        GalleryError::Storage {
            message: context.into(),
            source: Some(Box::new(err)),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, GalleryError::NotFound { .. })
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, GalleryError::Validation { .. })
    }

    #[must_use]
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, GalleryError::InvalidRange(_))
    }

    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, GalleryError::Storage { .. })
    }
}
