//! Core types for document representation and serialization.
//!
//! A [`Document`] is identified by its `id`. The id is optional on input: a store assigns
//! one when it is missing. The `created` timestamp is owned by the store and is set
//! exactly once, when the document is first inserted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::error::DocumentStoreResult;

/// The author attached to a [`Document`].
///
/// Authors are opaque values. They are neither stored separately nor validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }
}

/// A stored record with an identifier, title, content, author and creation timestamp.
///
/// # Example
///
/// ```ignore
/// use docstore::document::{Author, Document};
///
/// let document = Document::builder()
///     .title("Release notes")
///     .content("Everything changed")
///     .author(Author::new("1", "Alice"))
///     .build();
///
/// assert!(document.id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl Document {
    /// Creates a new builder for fluent construction.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Returns the identifier if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Converts this document to a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> DocumentStoreResult<Value> {
        Ok(to_value(self)?)
    }

    /// Creates a document from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    pub fn from_json(value: Value) -> DocumentStoreResult<Self> {
        Ok(from_value(value)?)
    }

    /// Overwrites the mutable fields of this document with those of `other`.
    ///
    /// Title, content and author are replaced as-is, absent values included.
    /// The id and the creation timestamp are left untouched.
    pub fn overwrite_with(&mut self, other: Document) {
        self.title = other.title;
        self.content = other.content;
        self.author = other.author;
    }
}

/// Builder for [`Document`] values.
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.document.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.document.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.document.content = Some(content.into());
        self
    }

    pub fn author(mut self, author: impl Into<Option<Author>>) -> Self {
        self.document.author = author.into();
        self
    }

    /// Sets the creation timestamp.
    ///
    /// Stores ignore this value on save; it is only useful for building expected values.
    pub fn created(mut self, created: DateTime<Utc>) -> Self {
        self.document.created = Some(created);
        self
    }

    pub fn build(self) -> Document {
        self.document
    }
}
