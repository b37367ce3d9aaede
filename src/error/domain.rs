//! Domain-specific error types using `thiserror`.
//!
//! The binding layer never fails outward; these errors only cover opening
//! and saving the on-disk preference store.

use std::io::Error as StdError;

use {serde_json::Error as SerdeJsonError, thiserror::Error};

/// Preference store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the preferences file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize preferences.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// The preferences file is not a flat object of scalar values.
    #[error("Invalid preferences file: {reason}")]
    InvalidContent { reason: String },
}

impl StoreError {
    /// Creates a new `InvalidContent` error.
    pub fn invalid_content(reason: impl Into<String>) -> Self {
        Self::InvalidContent {
            reason: reason.into(),
        }
    }
}
