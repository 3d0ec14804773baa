//! Storage backend abstraction for the document store.
//!
//! The [`StoreBackend`] trait is the engine behind [`DocumentStore`](crate::store::DocumentStore):
//! it owns the identifier-to-document mapping and the id counter, while the store in front of
//! it validates arguments. Backends receive already-validated input.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances

use async_trait::async_trait;
use std::{collections::HashMap, fmt::Debug};

use crate::{document::Document, error::DocumentStoreResult, query::Expr};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Upserts have to be atomic with respect to each
/// other: the check for an existing id, id generation and the insert happen under one
/// exclusive section. Reads may run concurrently with each other.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts or updates a document keyed by its id.
    ///
    /// - Without an id, a fresh id is generated and `created` is set to now.
    /// - With the id of a stored document, title, content and author of the stored
    ///   record are overwritten; its id and `created` are kept.
    /// - With an unknown id, the document is inserted under that id and `created` is set to now.
    ///
    /// Returns the stored record.
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<Document>;

    /// Retrieves a document by id, or `None` if no document has that id.
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>>;

    /// Returns every stored document matching the filter, in no particular order.
    async fn query_documents(&self, filter: &Expr) -> DocumentStoreResult<Vec<Document>>;

    /// Returns an independent copy of the whole id-to-document mapping.
    async fn snapshot(&self) -> DocumentStoreResult<HashMap<String, Document>>;

    /// Returns the current position of the id counter.
    async fn current_index(&self) -> DocumentStoreResult<u64>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
impl<B> StoreBackend for &B
where
    B: StoreBackend,
{
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<Document> {
        (*self).upsert_document(document).await
    }

    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        (*self).get_document(id).await
    }

    async fn query_documents(&self, filter: &Expr) -> DocumentStoreResult<Vec<Document>> {
        (*self).query_documents(filter).await
    }

    async fn snapshot(&self) -> DocumentStoreResult<HashMap<String, Document>> {
        (*self).snapshot().await
    }

    async fn current_index(&self) -> DocumentStoreResult<u64> {
        (*self).current_index().await
    }
}

/// Factory trait for constructing backends.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
