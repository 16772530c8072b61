//! Errors reported by item store backends.

use thiserror::Error;

/// Failure reported by an [`ItemStore`](super::ItemStore).
///
/// Backends classify what they can: a failed existence precondition, a record
/// constraint violation, or a cancelled transaction. Everything else is
/// transport or encoding trouble.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Condition failed for {gallery_id}/{item_id}: {reason}")]
    ConditionFailed {
        gallery_id: String,
        item_id: String,
        reason: &'static str,
    },

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Transaction cancelled: {0}")]
    TransactionCanceled(Box<StoreError>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    pub(crate) fn missing(gallery_id: &str, item_id: &str) -> Self {
        StoreError::ConditionFailed {
            gallery_id: gallery_id.to_string(),
            item_id: item_id.to_string(),
            reason: "item does not exist",
        }
    }

    pub(crate) fn occupied(gallery_id: &str, item_id: &str) -> Self {
        StoreError::ConditionFailed {
            gallery_id: gallery_id.to_string(),
            item_id: item_id.to_string(),
            reason: "key already in use",
        }
    }

    /// True when the store rejected the write because of an existence check.
    #[must_use]
    pub fn is_condition_failure(&self) -> bool {
        matches!(self, StoreError::ConditionFailed { .. })
    }

    /// True when the record itself was rejected.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::Constraint(_))
    }
}
