//! Convenient re-exports of commonly used types from docstore.
//!
//! ```ignore
//! use docstore::prelude::*;
//! ```

pub use docstore_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    document::{Author, Document, DocumentBuilder},
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, FieldOp, Filter, QueryVisitor, SearchRequest, SearchRequestBuilder, Value},
    store::DocumentStore,
};
