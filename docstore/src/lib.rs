//! Main docstore crate providing an in-memory document repository.
//!
//! This crate is the primary entry point for users of docstore. It re-exports the core
//! types from `docstore-core` and the in-memory backend from `docstore-memory`.
//!
//! # Features
//!
//! - **Upsert** - Save documents with generated or caller-supplied ids
//! - **Lookup** - Find a document by id
//! - **Search** - Filter documents by title, content, author and creation time
//!
//! # Quick Start
//!
//! ```ignore
//! use docstore::{prelude::*, memory::InMemoryStore};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await.unwrap());
//!
//!     let saved = store
//!         .save(
//!             Document::builder()
//!                 .title("Title One")
//!                 .content("Content One")
//!                 .author(Author::new("1", "Author One"))
//!                 .build(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     let found = store
//!         .search(
//!             SearchRequest::builder()
//!                 .title_prefixes(["Title One"])
//!                 .created_from(Utc::now() - Duration::hours(1))
//!                 .build(),
//!         )
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(found, vec![saved]);
//!
//!     store.shutdown().await.unwrap();
//! }
//! ```
//!
//! # Search semantics
//!
//! Title, content and author criteria match by exact value. A criterion left out, or
//! given as an empty list, does not restrict results. Documents missing a title, content,
//! author id or creation timestamp are never returned by a search.

pub mod prelude;

pub use docstore_core::{backend, document, error, query, store};

// Re-exported for building timestamps and JSON payloads
pub use chrono;
pub use serde_json;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docstore_memory::{InMemoryStore, InMemoryStoreBuilder, InMemoryStoreConfig};
}
