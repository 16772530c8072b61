/// Trait for mapping domain errors to structured error codes and optional tips.
pub trait ToStructuredError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>);
}

// ── GalleryError ──────────────────────────────────────────────────────────────
impl ToStructuredError for crate::item::GalleryError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::item::GalleryError;
        match self {
            GalleryError::InvalidRange(_) => (
                "INVALID_RANGE",
                Some("Use keys from 'photo-gallery list'; --after must sort below --before"),
            ),
            GalleryError::Validation { .. } => ("VALIDATION_ERROR", None),
            GalleryError::NotFound { .. } => (
                "ITEM_NOT_FOUND",
                Some("Run 'photo-gallery list' to see the items of the gallery"),
            ),
            GalleryError::Storage { .. } => ("STORAGE_ERROR", None),
        }
    }
}

// ── ConfigError ───────────────────────────────────────────────────────────────
impl ToStructuredError for crate::config::ConfigError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::config::ConfigError;
        match self {
            ConfigError::Io { .. } => ("CONFIG_IO_ERROR", None),
            ConfigError::Toml(_) => ("CONFIG_PARSE_ERROR", None),
            ConfigError::Invalid(_) => (
                "CONFIG_INVALID",
                Some("Check ~/.photo-gallery/config.toml or the PHOTO_GALLERY_* variables"),
            ),
        }
    }
}

// ── StoreError ────────────────────────────────────────────────────────────────
impl ToStructuredError for crate::store::StoreError {
    fn error_code_and_tip(&self) -> (&str, Option<&str>) {
        use crate::store::StoreError;
        match self {
            StoreError::Io(_) => ("IO_ERROR", None),
            StoreError::Json(_) => (
                "STORE_CORRUPT",
                Some("The item store file is not valid JSON"),
            ),
            StoreError::ConditionFailed { .. }
            | StoreError::Constraint(_)
            | StoreError::TransactionCanceled(_)
            | StoreError::Backend(_) => ("STORAGE_ERROR", None),
        }
    }
}
