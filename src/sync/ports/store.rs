//! Document store port: CRUD, atomic batches and change notification.

use crate::sync::domain::{ChangeEvent, CollectionRef, Document, DocumentFields, WriteOp};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

/// Result type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Remote document store contract.
///
/// Every call is a single round trip; batches are all-or-nothing. Change
/// notifications are delivered after the write they describe is visible to
/// readers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads one document.
    ///
    /// Returns `None` when the document does not exist.
    async fn get(
        &self,
        collection: &CollectionRef,
        id: &str,
    ) -> DocumentStoreResult<Option<DocumentFields>>;

    /// Reads every document of a collection, ordered by identifier.
    async fn list(&self, collection: &CollectionRef) -> DocumentStoreResult<Vec<Document>>;

    /// Creates or replaces a document.
    async fn put(
        &self,
        collection: &CollectionRef,
        id: &str,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()>;

    /// Merges fields into an existing document. A `null` value removes the
    /// field.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::NotFound`] when the document does not
    /// exist.
    async fn merge(
        &self,
        collection: &CollectionRef,
        id: &str,
        fields: DocumentFields,
    ) -> DocumentStoreResult<()>;

    /// Removes a document. Removing a missing document succeeds.
    async fn delete(&self, collection: &CollectionRef, id: &str) -> DocumentStoreResult<()>;

    /// Applies every write or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::BatchTooLarge`] when the batch exceeds
    /// [`DocumentStore::max_batch_size`], or the error of the first failing
    /// write. The store is unchanged on error.
    async fn batch(&self, ops: Vec<WriteOp>) -> DocumentStoreResult<()>;

    /// Subscribes to changes of one collection.
    async fn on_change(
        &self,
        collection: &CollectionRef,
    ) -> DocumentStoreResult<broadcast::Receiver<ChangeEvent>>;

    /// Largest batch the store accepts.
    fn max_batch_size(&self) -> usize;
}

/// Errors returned by document store implementations.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// The document does not exist.
    #[error("document not found: {collection}/{id}")]
    NotFound {
        /// Collection searched.
        collection: CollectionRef,
        /// Missing document identifier.
        id: String,
    },

    /// The batch exceeds the store's write limit.
    #[error("batch of {operations} writes exceeds the store limit of {limit}")]
    BatchTooLarge {
        /// Writes in the rejected batch.
        operations: usize,
        /// Store limit.
        limit: usize,
    },

    /// The store could not be reached or failed internally.
    #[error("document store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DocumentStoreError {
    /// Wraps a transport or backend error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
