// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod cli;
pub mod config;
pub mod error_output;
pub mod item;
pub mod logging;
pub mod ordering;
pub mod staging;
pub mod store;

// Re-export commonly used types
pub use config::{load_config, ConfigError, GalleryConfig};
pub use item::{
    CreatedItem, GalleryError, GalleryItem, GalleryItemManager, Geometry, ItemPatch, NewItem,
    Placement,
};
pub use ordering::{generate_key, generate_keys, KeyError};
pub use staging::{PresignedUrlStager, StagingError, StagingKey, UploadStager};
pub use store::{ItemStore, JsonFileItemStore, MemoryItemStore, StoreError, TransactOp};
