//! In-memory storage implementation for document stores.
//!
//! Documents live in a `HashMap` keyed by id. The map and the id counter sit behind a
//! single async-aware read-write lock, so an upsert (existence check, id generation and
//! insert) is one exclusive section while lookups and searches share the lock.

use async_trait::async_trait;
use chrono::Utc;
use mea::rwlock::RwLock;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, instrument};

use docstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult, messages},
    query::Expr,
};

use crate::evaluator::DocumentEvaluator;

type DocumentMap = HashMap<String, Document>;

const DEFAULT_FIRST_INDEX: u64 = 1;

#[derive(Debug)]
struct State {
    documents: DocumentMap,
    /// Next candidate for a generated id. Left on the last issued value.
    index: u64,
}

impl State {
    fn new(first_index: u64, capacity: usize) -> Self {
        Self {
            documents: DocumentMap::with_capacity(capacity),
            index: first_index,
        }
    }

    /// Advances the counter past every id already taken and issues it.
    ///
    /// Caller-supplied ids may occupy future counter values, so the map is the only
    /// source of truth for freshness.
    fn generate_id(&mut self) -> DocumentStoreResult<String> {
        while self.documents.contains_key(&self.index.to_string()) {
            self.index = self
                .index
                .checked_add(1)
                .ok_or(DocumentStoreError::IdsExhausted(self.index))?;
        }

        Ok(self.index.to_string())
    }

    fn upsert(&mut self, mut document: Document) -> DocumentStoreResult<Document> {
        let id = match document.id.take() {
            Some(id) => id,
            None => self.generate_id()?,
        };

        if let Some(existing) = self.documents.get_mut(&id) {
            existing.overwrite_with(document);
            debug!(doc_id = %id, "Updated stored document");
            return Ok(existing.clone());
        }

        document.id = Some(id.clone());
        document.created = Some(Utc::now());
        debug!(doc_id = %id, "Inserted new document");

        self.documents.insert(id, document.clone());
        Ok(document)
    }
}

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state. Multiple clones
/// of the same instance share the same underlying data.
///
/// Searches scan every stored document; there is no indexing.
///
/// # Example
///
/// ```ignore
/// use docstore_memory::InMemoryStore;
/// use docstore::backend::StoreBackend;
///
/// let store = InMemoryStore::new();
/// let saved = store.upsert_document(Document::builder().title("Title").build()).await?;
///
/// assert_eq!(saved.id(), Some("1"));
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty store whose generated ids start at `"1"`.
    pub fn new() -> Self {
        Self::with_state(State::new(DEFAULT_FIRST_INDEX, 0))
    }

    /// Creates a builder for constructing an `InMemoryStore` with custom options.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    fn with_state(state: State) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    #[instrument(skip(self, document))]
    async fn upsert_document(&self, document: Document) -> DocumentStoreResult<Document> {
        let mut state = self.state.write().await;

        state.upsert(document)
    }

    #[instrument(skip(self))]
    async fn get_document(&self, id: &str) -> DocumentStoreResult<Option<Document>> {
        let state = self.state.read().await;
        let document = state.documents.get(id).cloned();
        debug!(found = document.is_some(), "Looked up document");

        Ok(document)
    }

    #[instrument(skip(self, filter))]
    async fn query_documents(&self, filter: &Expr) -> DocumentStoreResult<Vec<Document>> {
        let state = self.state.read().await;
        let documents = DocumentEvaluator::filter_documents(state.documents.values(), filter)?;
        debug!(
            scanned = state.documents.len(),
            matched = documents.len(),
            "Filtered stored documents"
        );

        Ok(documents)
    }

    async fn snapshot(&self) -> DocumentStoreResult<HashMap<String, Document>> {
        Ok(self.state.read().await.documents.clone())
    }

    async fn current_index(&self) -> DocumentStoreResult<u64> {
        Ok(self.state.read().await.index)
    }
}

/// Construction options for [`InMemoryStore`].
///
/// Can be deserialized from any serde format; missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InMemoryStoreConfig {
    /// First value of the id counter. Must be positive.
    pub first_index: u64,
    /// Number of documents to reserve room for up front.
    pub capacity: usize,
}

impl Default for InMemoryStoreConfig {
    fn default() -> Self {
        Self {
            first_index: DEFAULT_FIRST_INDEX,
            capacity: 0,
        }
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
///
/// # Example
///
/// ```ignore
/// use docstore_memory::InMemoryStore;
/// use docstore::backend::StoreBackendBuilder;
///
/// let store = InMemoryStore::builder()
///     .first_index(100)
///     .capacity(1024)
///     .build()
///     .await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStoreBuilder {
    config: InMemoryStoreConfig,
}

impl InMemoryStoreBuilder {
    /// Seeds the builder from a configuration value.
    pub fn from_config(config: InMemoryStoreConfig) -> Self {
        Self { config }
    }

    pub fn first_index(mut self, first_index: u64) -> Self {
        self.config.first_index = first_index;
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }
}

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Builds a new, empty [`InMemoryStore`].
    ///
    /// Fails if the configured first index is zero.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        if self.config.first_index == 0 {
            return Err(DocumentStoreError::invalid_argument(messages::FIRST_INDEX_NOT_POSITIVE));
        }

        debug!(
            first_index = self.config.first_index,
            capacity = self.config.capacity,
            "Building in-memory store"
        );

        Ok(InMemoryStore::with_state(State::new(
            self.config.first_index,
            self.config.capacity,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore_core::{document::Author, query::SearchRequest};
    use std::collections::HashSet;

    fn titled(title: &str) -> Document {
        Document::builder()
            .title(title)
            .content("Content")
            .author(Author::new("1", "Author"))
            .build()
    }

    #[tokio::test]
    async fn generated_ids_follow_the_counter() {
        let store = InMemoryStore::new();

        let first = store.upsert_document(titled("A")).await.unwrap();
        let second = store.upsert_document(titled("B")).await.unwrap();

        assert_eq!(first.id(), Some("1"));
        assert_eq!(second.id(), Some("2"));
        assert_eq!(store.current_index().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn generation_skips_ids_supplied_by_callers() {
        let store = InMemoryStore::new();

        store
            .upsert_document(Document::builder().id("1").title("Taken").build())
            .await
            .unwrap();
        store
            .upsert_document(Document::builder().id("2").title("Taken").build())
            .await
            .unwrap();
        let generated = store.upsert_document(titled("Fresh")).await.unwrap();

        assert_eq!(generated.id(), Some("3"));
        assert_eq!(store.snapshot().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn counter_gap_from_future_collision() {
        let store = InMemoryStore::new();

        store.upsert_document(titled("A")).await.unwrap();
        store
            .upsert_document(Document::builder().id("3").title("Ahead").build())
            .await
            .unwrap();

        let second = store.upsert_document(titled("B")).await.unwrap();
        let third = store.upsert_document(titled("C")).await.unwrap();

        assert_eq!(second.id(), Some("2"));
        assert_eq!(third.id(), Some("4"));
    }

    #[tokio::test]
    async fn exhausted_counter_is_an_error() {
        let store = InMemoryStore::builder().first_index(u64::MAX).build().await.unwrap();

        store
            .upsert_document(Document::builder().id(u64::MAX.to_string()).title("Last").build())
            .await
            .unwrap();
        let err = store.upsert_document(titled("Overflow")).await.unwrap_err();

        assert!(matches!(err, DocumentStoreError::IdsExhausted(u64::MAX)));
        assert_eq!(store.current_index().await.unwrap(), u64::MAX);

        let custom = store
            .upsert_document(Document::builder().id("custom").title("Still writable").build())
            .await
            .unwrap();
        assert_eq!(custom.id(), Some("custom"));
        assert_eq!(store.snapshot().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn last_counter_value_is_still_issued() {
        let store = InMemoryStore::builder().first_index(u64::MAX).build().await.unwrap();

        let saved = store.upsert_document(titled("Last")).await.unwrap();

        assert_eq!(saved.id(), Some(u64::MAX.to_string().as_str()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_upserts_issue_distinct_ids() {
        let store = InMemoryStore::new();

        let handles = (0..200)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.upsert_document(titled(&format!("Doc {i}"))).await })
            })
            .collect::<Vec<_>>();

        let mut ids = HashSet::new();
        for handle in handles {
            let saved = handle.await.unwrap().unwrap();
            assert!(ids.insert(saved.id.unwrap()));
        }

        assert_eq!(ids.len(), 200);
        assert_eq!(store.snapshot().await.unwrap().len(), 200);
        assert_eq!(store.current_index().await.unwrap(), 200);
    }

    #[tokio::test]
    async fn created_is_assigned_by_the_store() {
        let store = InMemoryStore::new();
        let stale = Utc::now() - chrono::Duration::days(30);

        let saved = store
            .upsert_document(Document::builder().title("A").created(stale).build())
            .await
            .unwrap();

        assert!(saved.created.unwrap() > stale);
    }

    #[tokio::test]
    async fn update_keeps_created_and_overwrites_fields() {
        let store = InMemoryStore::new();
        let original = store.upsert_document(titled("A")).await.unwrap();

        let updated = store
            .upsert_document(Document::builder().id("1").content("").build())
            .await
            .unwrap();

        assert_eq!(updated.created, original.created);
        assert_eq!(updated.content.as_deref(), Some(""));
        assert!(updated.title.is_none());
        assert!(updated.author.is_none());
        assert_eq!(store.get_document("1").await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn snapshot_is_detached_from_the_store() {
        let store = InMemoryStore::new();
        store.upsert_document(titled("A")).await.unwrap();

        let mut snapshot = store.snapshot().await.unwrap();
        snapshot.clear();

        assert_eq!(store.snapshot().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        clone.upsert_document(titled("A")).await.unwrap();

        assert!(store.get_document("1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn query_scans_every_document() {
        let store = InMemoryStore::new();
        store.upsert_document(titled("A")).await.unwrap();
        store.upsert_document(titled("B")).await.unwrap();

        let all = store
            .query_documents(&SearchRequest::default().to_filter())
            .await
            .unwrap();
        let only_b = store
            .query_documents(&SearchRequest::builder().title_prefixes(["B"]).build().to_filter())
            .await
            .unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b[0].title.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn builder_applies_first_index() {
        let store = InMemoryStore::builder()
            .first_index(100)
            .capacity(8)
            .build()
            .await
            .unwrap();

        let saved = store.upsert_document(titled("A")).await.unwrap();

        assert_eq!(saved.id(), Some("100"));
    }

    #[tokio::test]
    async fn builder_rejects_zero_first_index() {
        let err = InMemoryStore::builder().first_index(0).build().await.unwrap_err();

        assert_eq!(err.to_string(), messages::FIRST_INDEX_NOT_POSITIVE);
    }

    #[tokio::test]
    async fn builder_from_partial_config() {
        let config: InMemoryStoreConfig =
            serde_json::from_value(serde_json::json!({ "firstIndex": 7 })).unwrap();

        assert_eq!(config.capacity, 0);

        let store = InMemoryStoreBuilder::from_config(config).build().await.unwrap();
        assert_eq!(store.current_index().await.unwrap(), 7);
    }
}
