//! Core of the docstore project: an in-memory-first document repository with upsert,
//! lookup by identifier and multi-criteria search.
//!
//! This crate provides:
//!
//! - **Document model** ([`document`]) - Documents, authors and their JSON form
//! - **Store backend abstraction** ([`backend`]) - Traits for implementing storage backends
//! - **Search API** ([`query`]) - Search requests and the filter expressions they compile into
//! - **Document store** ([`store`]) - The validating entry point callers work with
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use docstore::{prelude::*, memory::InMemoryStore};
//!
//! let store = DocumentStore::new(InMemoryStore::builder().build().await?);
//!
//! store
//!     .save(
//!         Document::builder()
//!             .title("Title")
//!             .content("Content")
//!             .author(Author::new("1", "Alice"))
//!             .build(),
//!     )
//!     .await?;
//!
//! let found = store
//!     .search(SearchRequest::builder().author_ids(["1"]).build())
//!     .await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docstore_core;

pub mod backend;
pub mod document;
pub mod error;
pub mod query;
pub mod store;
