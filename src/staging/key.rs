//! Staging object keys.
//!
//! Each photo is uploaded to `{gallery}/{item}/{photo}/{x}:{y}:{width}:{height}`.
//! The post-upload processor reads the same key back to find the item the
//! photo belongs to and the crop it should apply.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::StagingError;
use crate::item::types::Geometry;

/// Address of one photo upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingKey {
    pub gallery_id: String,
    pub item_id: String,
    pub photo_id: String,
    pub geometry: Geometry,
}

impl StagingKey {
    pub fn new(
        gallery_id: impl Into<String>,
        item_id: impl Into<String>,
        photo_id: impl Into<String>,
        geometry: Geometry,
    ) -> Result<Self, StagingError> {
        let key = Self {
            gallery_id: gallery_id.into(),
            item_id: item_id.into(),
            photo_id: photo_id.into(),
            geometry,
        };
        for (name, value) in [
            ("gallery id", &key.gallery_id),
            ("item id", &key.item_id),
            ("photo id", &key.photo_id),
        ] {
            check_component(name, value)?;
        }
        Ok(key)
    }
}

fn check_component(name: &str, value: &str) -> Result<(), StagingError> {
    if value.is_empty() {
        return Err(StagingError::InvalidKey(format!("{name} is empty")));
    }
    if value.contains('/') {
        return Err(StagingError::InvalidKey(format!(
            "{name} '{value}' contains '/'"
        )));
    }
    Ok(())
}

impl fmt::Display for StagingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.gallery_id, self.item_id, self.photo_id, self.geometry
        )
    }
}

impl FromStr for StagingKey {
    type Err = StagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        let [gallery_id, item_id, photo_id, geometry] = parts.as_slice() else {
            return Err(StagingError::InvalidKey(format!(
                "expected 4 '/'-separated parts in '{s}'"
            )));
        };
        let geometry = geometry.parse().map_err(StagingError::InvalidKey)?;
        Self::new(*gallery_id, *item_id, *photo_id, geometry)
    }
}
