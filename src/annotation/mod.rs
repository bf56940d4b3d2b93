//! Timeline entries, the image asset arena and per-image stroke collections.

mod model;
mod store;

pub use model::{EntryField, EntryId, TimelineEntry};
pub use store::AnnotationStore;

use crate::assets::AssetId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("timeline entry {0} does not exist")]
    EntryNotFound(EntryId),
    #[error("image asset {0} does not exist")]
    AssetNotFound(AssetId),
}

pub type AnnotationResult<T> = std::result::Result<T, AnnotationError>;
