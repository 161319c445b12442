//! Errors returned by the sync adapter.

use crate::error::FailureKind;
use crate::sync::domain::CollectionKind;
use crate::sync::ports::DocumentStoreError;
use thiserror::Error;

/// Result type for sync adapter operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors returned by [`super::SyncAdapter`].
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),

    /// An import payload was malformed; nothing was written.
    #[error("invalid import payload: {0}")]
    InvalidFormat(String),

    /// A bulk operation needs more writes than one atomic batch allows.
    #[error("operation needs {operations} writes but a batch allows {limit}")]
    BatchTooLarge {
        /// Writes the operation needs.
        operations: usize,
        /// Configured limit.
        limit: usize,
    },

    /// A stored document could not be decoded.
    #[error("stored {collection} document {id} is malformed: {reason}")]
    MalformedDocument {
        /// Collection holding the document.
        collection: CollectionKind,
        /// Document identifier.
        id: String,
        /// Decoding failure.
        reason: String,
    },

    /// A value could not be encoded as a document.
    #[error("failed to encode document: {0}")]
    Encode(String),

    /// No async runtime was available to run change listeners.
    #[error("no async runtime available for change listeners: {0}")]
    Runtime(String),
}

impl SyncError {
    /// Classifies the error for presentation.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidFormat(_) => FailureKind::InvalidFormat,
            Self::Store(DocumentStoreError::NotFound { .. }) => FailureKind::NotFound,
            Self::Store(_)
            | Self::BatchTooLarge { .. }
            | Self::MalformedDocument { .. }
            | Self::Encode(_)
            | Self::Runtime(_) => FailureKind::SyncFailure,
        }
    }
}
