//! User configuration loaded from `~/.photo-gallery/config.toml`.
//!
//! The file is optional; every field falls back to its default.

mod io;

pub use io::{config_dir, default_config_path, load_config, parse_config};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::staging::{validate_ttl, PresignedUrlStager, DEFAULT_UPLOAD_TTL};

/// Gallery used when none is given on the command line.
pub const DEFAULT_GALLERY_ID: &str = "default";

const DEFAULT_REGION: &str = "us-east-1";
const STORE_FILENAME: &str = "items.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// `[store]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// JSON file backing the item store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// `[staging]` table: the S3-compatible bucket uploads go to.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StagingConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl std::fmt::Debug for StagingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingConfig")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            bucket: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

impl StagingConfig {
    #[must_use]
    pub fn upload_ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Build the URL issuer; fails when the bucket or credentials are missing.
    pub fn stager(&self) -> Result<PresignedUrlStager, ConfigError> {
        PresignedUrlStager::new(
            &self.endpoint,
            &self.bucket,
            &self.region,
            &self.access_key_id,
            &self.secret_access_key,
        )
        .map_err(|e| ConfigError::Invalid(format!("staging: {e}")))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GalleryConfig {
    #[serde(default = "default_gallery_id")]
    pub gallery_id: String,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub staging: StagingConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            gallery_id: default_gallery_id(),
            store: StoreConfig::default(),
            staging: StagingConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Store file, defaulting to `~/.photo-gallery/items.json`.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| config_dir().join(STORE_FILENAME))
    }

    /// Check values the TOML schema cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gallery_id.is_empty() || self.gallery_id.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "gallery_id '{}' must be non-empty and contain no '/'",
                self.gallery_id
            )));
        }
        validate_ttl(self.staging.upload_ttl())
            .map_err(|e| ConfigError::Invalid(format!("staging.ttl_seconds: {e}")))
    }
}

fn default_gallery_id() -> String {
    DEFAULT_GALLERY_ID.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_ttl_seconds() -> u64 {
    DEFAULT_UPLOAD_TTL.as_secs()
}
