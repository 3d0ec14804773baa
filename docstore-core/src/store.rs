//! Main document store interface.
//!
//! [`DocumentStore`] is the API callers work with. It checks the caller's arguments,
//! compiles search requests into filters and hands the work to a [`StoreBackend`].
//!
//! # Example
//!
//! ```ignore
//! use docstore::{prelude::*, memory::InMemoryStore};
//!
//! let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!
//! let saved = store
//!     .save(Document::builder().title("Title").content("Content").build())
//!     .await?;
//!
//! assert_eq!(saved.id(), Some("1"));
//! assert!(store.find_by_id("1").await?.is_some());
//! ```

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::{
    backend::StoreBackend,
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult, messages},
    query::SearchRequest,
};

/// A document store bound to a specific backend implementation.
///
/// Arguments that a caller may legitimately leave out are taken as `impl Into<Option<_>>`,
/// so both `store.save(document)` and `store.save(None)` are valid calls. A missing
/// argument is rejected with [`DocumentStoreError::InvalidArgument`].
#[derive(Debug)]
pub struct DocumentStore<B: StoreBackend> {
    backend: B,
}

impl<B: StoreBackend> DocumentStore<B> {
    /// Creates a new document store with the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Inserts or updates a document.
    ///
    /// A document without an id is assigned a fresh one. A document whose id is already
    /// stored replaces the title, content and author of the stored record while keeping
    /// its creation timestamp. Any other id is honored as a new insertion.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] if no document is given.
    pub async fn save(&self, document: impl Into<Option<Document>>) -> DocumentStoreResult<Document> {
        let document = document
            .into()
            .ok_or_else(|| rejected(messages::DOCUMENT_NULL))?;

        self.backend.upsert_document(document).await
    }

    /// Returns every stored document matching all criteria of the request.
    ///
    /// The order of the results is unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] if no request is given.
    pub async fn search(
        &self,
        request: impl Into<Option<SearchRequest>>,
    ) -> DocumentStoreResult<Vec<Document>> {
        let request = request
            .into()
            .ok_or_else(|| rejected(messages::SEARCH_REQUEST_NULL))?;

        let documents = self.backend.query_documents(&request.to_filter()).await?;
        debug!(count = documents.len(), "Searched documents");

        Ok(documents)
    }

    /// Looks up a document by id.
    ///
    /// Returns `Ok(None)` when no document has that id.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] if the id is missing or empty.
    pub async fn find_by_id<'i>(
        &self,
        id: impl Into<Option<&'i str>>,
    ) -> DocumentStoreResult<Option<Document>> {
        let id = match id.into() {
            Some(id) if !id.is_empty() => id,
            _ => return Err(rejected(messages::DOCUMENT_ID_NULL_OR_EMPTY)),
        };

        self.backend.get_document(id).await
    }

    /// Saves a document given as JSON.
    ///
    /// A JSON `null` counts as a missing document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] for `null` and
    /// [`DocumentStoreError::Serialization`] for a payload that is not a document.
    pub async fn save_json(&self, document: Value) -> DocumentStoreResult<Document> {
        let document = match document {
            Value::Null => None,
            value => Some(Document::from_json(value)?),
        };

        self.save(document).await
    }

    /// Searches with a request given as JSON.
    ///
    /// A JSON `null` counts as a missing request.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidArgument`] for `null` and
    /// [`DocumentStoreError::Serialization`] for a payload that is not a request.
    pub async fn search_json(&self, request: Value) -> DocumentStoreResult<Vec<Document>> {
        let request = match request {
            Value::Null => None,
            value => Some(serde_json::from_value::<SearchRequest>(value)?),
        };

        self.search(request).await
    }

    /// Returns a copy of the full id-to-document mapping.
    ///
    /// Changes made to the returned map do not affect the store.
    pub async fn stored_documents(&self) -> DocumentStoreResult<HashMap<String, Document>> {
        self.backend.snapshot().await
    }

    /// Returns the current position of the backend's id counter.
    pub async fn current_index(&self) -> DocumentStoreResult<u64> {
        self.backend.current_index().await
    }

    /// Shuts down the store and releases backend resources.
    pub async fn shutdown(self) -> DocumentStoreResult<()> {
        self.backend.shutdown().await?;

        Ok(())
    }
}

fn rejected(message: &str) -> DocumentStoreError {
    warn!(reason = message, "Rejected document store call");
    DocumentStoreError::invalid_argument(message)
}
