//! Errors raised while generating order keys.

use thiserror::Error;

/// A requested position cannot be expressed by any order key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("lower bound '{lower}' is not below upper bound '{upper}'")]
    Inverted { lower: String, upper: String },

    #[error("invalid order key '{key}': {reason}")]
    Malformed { key: String, reason: &'static str },

    #[error("order key space exhausted: {0}")]
    Exhausted(&'static str),
}

impl KeyError {
    pub(crate) fn malformed(key: &[u8], reason: &'static str) -> Self {
        KeyError::Malformed {
            key: String::from_utf8_lossy(key).into_owned(),
            reason,
        }
    }
}
