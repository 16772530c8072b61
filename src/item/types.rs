//! Gallery item records and the request shapes used to create and change them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Crop/thumbnail rectangle supplied for one photo at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Geometry {
    #[must_use]
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Rendered as `x:y:width:height`, the form used in staging object keys.
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.x, self.y, self.width, self.height)
    }
}

impl FromStr for Geometry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [x, y, width, height] = parts.as_slice() else {
            return Err(format!("expected x:y:width:height, got '{s}'"));
        };
        let parse = |name: &str, value: &str| {
            value
                .parse::<u32>()
                .map_err(|e| format!("invalid {name} '{value}' in '{s}': {e}"))
        };
        Ok(Self {
            x: parse("x", x)?,
            y: parse("y", y)?,
            width: parse("width", width)?,
            height: parse("height", height)?,
        })
    }
}

/// One ordered entry in a gallery.
///
/// `item_id` is the order key: it identifies the item within its gallery and
/// its byte-wise order is the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub gallery_id: String,
    pub item_id: String,
    /// One opaque id per photo, fixed at creation.
    pub photo_refs: Vec<String>,
    /// Caller-supplied timestamp. Descriptive only.
    pub captured_at: String,
    /// Photos that finished post-upload processing.
    pub processed_count: u32,
    pub location: String,
}

impl GalleryItem {
    /// Visible in the public view once every photo has been processed.
    #[must_use]
    pub fn is_fully_processed(&self) -> bool {
        usize::try_from(self.processed_count).is_ok_and(|count| count == self.photo_refs.len())
    }

    /// Copy of this item at a different position.
    #[must_use]
    pub fn rekeyed(&self, item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            ..self.clone()
        }
    }

    /// Record constraints every store enforces on write.
    pub fn check_constraints(&self) -> Result<(), String> {
        if self.photo_refs.is_empty() {
            return Err("an item needs at least one photo".to_string());
        }
        let within = usize::try_from(self.processed_count)
            .is_ok_and(|count| count <= self.photo_refs.len());
        if !within {
            return Err(format!(
                "processedCount {} exceeds the {} photos of item {}",
                self.processed_count,
                self.photo_refs.len(),
                self.item_id
            ));
        }
        Ok(())
    }

    /// Apply `patch` in place, keeping the photo count fixed.
    pub fn apply_patch(&mut self, patch: &ItemPatch) -> Result<(), String> {
        if let Some(photo_refs) = &patch.photo_refs {
            if photo_refs.len() != self.photo_refs.len() {
                return Err(format!(
                    "photoRefs must keep {} entries, got {}",
                    self.photo_refs.len(),
                    photo_refs.len()
                ));
            }
            self.photo_refs.clone_from(photo_refs);
        }
        if let Some(processed_count) = patch.processed_count {
            self.processed_count = processed_count;
        }
        if let Some(location) = &patch.location {
            self.location.clone_from(location);
        }
        self.check_constraints()
    }

    /// Integrity check on a record read back from a store.
    pub(crate) fn check_integrity(&self, gallery_id: &str, item_id: &str) -> Result<(), String> {
        if self.gallery_id != gallery_id || self.item_id != item_id {
            return Err(format!(
                "record stored under {gallery_id}/{item_id} claims {}/{}",
                self.gallery_id, self.item_id
            ));
        }
        if self.captured_at.is_empty() {
            return Err(format!("record {item_id} has no capturedAt"));
        }
        self.check_constraints()
    }
}

/// Fields a caller supplies to create an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    /// One rectangle per photo, in upload order.
    pub geometry: Vec<Geometry>,
    pub captured_at: String,
    pub location: String,
}

/// Partial update of the mutable fields of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_refs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ItemPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_photo_refs(mut self, photo_refs: Vec<String>) -> Self {
        self.photo_refs = Some(photo_refs);
        self
    }

    #[must_use]
    pub fn with_processed_count(mut self, processed_count: u32) -> Self {
        self.processed_count = Some(processed_count);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.photo_refs.is_none() && self.processed_count.is_none() && self.location.is_none()
    }
}

/// Neighbours an item should be placed between.
///
/// `before` names the key the item must sort below and `after` the key it
/// must sort above. Either side may be left open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl Placement {
    /// Open on both sides.
    #[must_use]
    pub fn anywhere() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn before(key: impl Into<String>) -> Self {
        Self {
            before: Some(key.into()),
            after: None,
        }
    }

    #[must_use]
    pub fn after(key: impl Into<String>) -> Self {
        Self {
            before: None,
            after: Some(key.into()),
        }
    }

    #[must_use]
    pub fn between(after: impl Into<String>, before: impl Into<String>) -> Self {
        Self {
            before: Some(before.into()),
            after: Some(after.into()),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

/// Result of a create: the stored item and one upload URL per photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItem {
    pub item: GalleryItem,
    /// Same order as the geometry list of the request.
    pub upload_targets: Vec<String>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
