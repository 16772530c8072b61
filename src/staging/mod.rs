//! The upload staging adapter.
//!
//! Photos are not uploaded through this service. For every photo the manager
//! asks an [`UploadStager`] for a short-lived URL the client can write the
//! bytes to directly.

pub mod key;
pub mod presign;

pub use key::StagingKey;
pub use presign::{
    validate_ttl, PresignedUrlStager, DEFAULT_UPLOAD_TTL, MAX_UPLOAD_TTL, UPLOAD_CONTENT_TYPE,
};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StagingError {
    #[error("Invalid staging key: {0}")]
    InvalidKey(String),

    #[error("Invalid upload TTL {ttl:?}: must be between 1 second and {max:?}")]
    InvalidTtl { ttl: Duration, max: Duration },

    #[error("Staging service error: {0}")]
    Service(String),
}

/// Issues time-limited write targets for single photos.
#[async_trait]
pub trait UploadStager: Send + Sync {
    /// One URL that accepts a single upload to `key` for `ttl`.
    async fn issue_upload_target(
        &self,
        key: &StagingKey,
        ttl: Duration,
    ) -> Result<String, StagingError>;
}

#[cfg(test)]
#[path = "staging_tests.rs"]
mod staging_tests;
