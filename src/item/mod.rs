//! Gallery items and the manager that keeps them ordered.

pub mod error;
pub mod manager;
pub mod types;

pub use error::GalleryError;
pub use manager::GalleryItemManager;
pub use types::{CreatedItem, GalleryItem, Geometry, ItemPatch, NewItem, Placement};
