use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::{ConfigError, GalleryConfig};

/// `~/.photo-gallery`, or `./.photo-gallery` when no home directory is known.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".photo-gallery")
}

#[must_use]
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Parse and validate a TOML document.
pub fn parse_config(content: &str) -> Result<GalleryConfig, ConfigError> {
    let config: GalleryConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from `path`, or from the default location.
///
/// An explicit path must exist. A missing file at the default location
/// yields the defaults.
pub async fn load_config(path: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path(), false),
    };
    if !required && !fs::try_exists(&path).await.unwrap_or(false) {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(GalleryConfig::default());
    }
    let content = fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
    let config = parse_config(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
