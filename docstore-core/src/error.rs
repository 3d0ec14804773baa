//! Error types and result types for document store operations.
//!
//! Use [`DocumentStoreResult<T>`] as the return type for fallible operations.
//! Caller contract violations surface as [`DocumentStoreError::InvalidArgument`] whose
//! display text is exactly one of the messages in [`messages`].

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Fixed messages carried by [`DocumentStoreError::InvalidArgument`].
pub mod messages {
    /// Raised when `save` receives no document.
    pub const DOCUMENT_NULL: &str = "Document cannot be null";
    /// Raised when `search` receives no request.
    pub const SEARCH_REQUEST_NULL: &str = "Search request cannot be null";
    /// Raised when `find_by_id` receives no id or an empty one.
    pub const DOCUMENT_ID_NULL_OR_EMPTY: &str = "Document id cannot be null or empty";
    /// Raised when a backend is configured to mint ids starting at zero.
    pub const FIRST_INDEX_NOT_POSITIVE: &str = "First index must be positive";
}

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// The caller passed an absent or malformed argument.
    #[error("{0}")]
    InvalidArgument(String),
    /// Every id from the given counter value upwards is already taken.
    #[error("No free document id at or above {0}")]
    IdsExhausted(u64),
    /// Serialization/deserialization error when converting between a document and JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DocumentStoreError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DocumentStoreError::InvalidArgument(message.into())
    }

    /// Returns `true` if this is an [`InvalidArgument`](DocumentStoreError::InvalidArgument) error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DocumentStoreError::InvalidArgument(_))
    }
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

impl From<SerdeJsonError> for DocumentStoreError {
    fn from(err: SerdeJsonError) -> Self {
        DocumentStoreError::Serialization(err.to_string())
    }
}
