//! In-memory document storage backend for docstore.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! Documents and the id counter share one async-aware RwLock.
//!
//! # Features
//!
//! - **Upsert semantics** - Generated or caller-supplied ids, creation timestamps set once
//! - **Filter evaluation** - Search requests are evaluated against every stored document
//! - **Snapshots** - Detached copies of the full id-to-document mapping
//!
//! # Quick Start
//!
//! ```ignore
//! use docstore::{prelude::*, memory::InMemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!
//!     let saved = store
//!         .save(Document::builder().title("Title").content("Content").build())
//!         .await?;
//!
//!     assert_eq!(saved.id(), Some("1"));
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docstore_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder, InMemoryStoreConfig};
