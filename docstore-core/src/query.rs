//! Search requests and the filter expressions they compile into.
//!
//! A [`SearchRequest`] is a conjunction of optional criteria. Before it reaches a backend
//! it is compiled by [`SearchRequest::to_filter`] into an [`Expr`] tree, which backends
//! evaluate with a [`QueryVisitor`].
//!
//! # Example
//!
//! ```ignore
//! use docstore::query::SearchRequest;
//!
//! let request = SearchRequest::builder()
//!     .title_prefixes(["Release notes"])
//!     .author_ids(["1"])
//!     .build();
//!
//! let filter = request.to_filter();
//! ```
//!
//! # Matching rules
//!
//! The list criteria are named after prefixes and substrings but match by exact value:
//! a document passes when its field equals one of the listed values. A `None` list and an
//! empty list both disable filtering on that dimension. The field itself must still be
//! present, so documents without a title, content, author id or creation timestamp never
//! match any request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DocumentStoreError;

/// Field paths understood by backends when evaluating an [`Expr`].
pub mod fields {
    pub const TITLE: &str = "title";
    pub const CONTENT: &str = "content";
    pub const AUTHOR_ID: &str = "author.id";
    pub const CREATED: &str = "created";
}

/// A literal operand of a field comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    DateTime(DateTime<Utc>),
    Array(Vec<Value>),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    /// Strictly greater than.
    Gt,
    /// Strictly less than.
    Lt,
    /// Equal to one of the values of an array operand.
    ///
    /// A non-array operand matches nothing.
    AnyOf,
}

/// A filter expression over documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Logical AND of multiple expressions (all must match).
    And(Vec<Expr>),
    /// Checks that a field is present.
    Exists(String),
    /// Field comparison expression.
    Field {
        /// The field path to compare.
        field: String,
        /// The comparison operator.
        op: FieldOp,
        /// The value to compare against.
        value: Value,
    },
}

impl Expr {
    /// Creates a field comparison expression.
    pub fn field(field: String, op: FieldOp, value: Value) -> Self {
        Expr::Field { field, op, value }
    }

    /// Combines this expression with another using logical AND.
    ///
    /// If this expression is already an AND, the other expression is appended
    /// to the list. Otherwise, a new AND expression is created.
    pub fn and(self, other: Expr) -> Self {
        match self {
            Expr::And(mut list) => {
                list.push(other);
                Expr::And(list)
            }
            _ => Expr::And(vec![self, other]),
        }
    }
}

/// Helper struct for constructing filter expressions.
pub struct Filter;

impl Filter {
    /// Matches documents where the field is strictly greater than the value.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field.into(), FieldOp::Gt, value.into())
    }

    /// Matches documents where the field is strictly less than the value.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Expr {
        Expr::field(field.into(), FieldOp::Lt, value.into())
    }

    /// Matches documents where the field equals any of the values.
    pub fn any_of<T: Into<Value>>(field: impl Into<String>, values: impl IntoIterator<Item = T>) -> Expr {
        let values = values.into_iter().map(Into::into).collect();

        Expr::field(field.into(), FieldOp::AnyOf, Value::Array(values))
    }

    /// Matches documents where the field is present.
    pub fn exists(field: impl Into<String>) -> Expr {
        Expr::Exists(field.into())
    }

    /// Combines expressions such that all must match.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }
}

/// A set of independent, optional filter criteria over stored documents.
///
/// Every criterion left as `None` (or, for lists, set to an empty list) places no
/// restriction on its dimension. Both timestamp bounds are exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub title_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub contains_contents: Option<Vec<String>>,
    #[serde(default)]
    pub author_ids: Option<Vec<String>>,
    #[serde(default)]
    pub created_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_to: Option<DateTime<Utc>>,
}

impl SearchRequest {
    /// Creates a new request builder for fluent construction.
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    /// Compiles this request into a filter expression.
    pub fn to_filter(&self) -> Expr {
        Filter::and([
            membership(fields::TITLE, self.title_prefixes.as_deref()),
            membership(fields::AUTHOR_ID, self.author_ids.as_deref()),
            membership(fields::CONTENT, self.contains_contents.as_deref()),
            self.created_range(),
        ])
    }

    fn created_range(&self) -> Expr {
        let mut expr = Filter::exists(fields::CREATED);

        if let Some(from) = self.created_from {
            expr = expr.and(Filter::gt(fields::CREATED, from));
        }

        if let Some(to) = self.created_to {
            expr = expr.and(Filter::lt(fields::CREATED, to));
        }

        expr
    }
}

// The field has to be present even when no values are listed.
fn membership(field: &str, values: Option<&[String]>) -> Expr {
    let present = Filter::exists(field);

    match values {
        Some(values) if !values.is_empty() => present.and(Filter::any_of(field, values.to_vec())),
        _ => present,
    }
}

/// Builder for [`SearchRequest`] values.
#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    pub fn title_prefixes<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.request.title_prefixes = Some(collect_strings(values));
        self
    }

    pub fn contains_contents<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.request.contains_contents = Some(collect_strings(values));
        self
    }

    pub fn author_ids<S: Into<String>>(mut self, values: impl IntoIterator<Item = S>) -> Self {
        self.request.author_ids = Some(collect_strings(values));
        self
    }

    pub fn created_from(mut self, from: DateTime<Utc>) -> Self {
        self.request.created_from = Some(from);
        self
    }

    pub fn created_to(mut self, to: DateTime<Utc>) -> Self {
        self.request.created_to = Some(to);
        self
    }

    pub fn build(self) -> SearchRequest {
        self.request
    }
}

fn collect_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Vec<String> {
    values.into_iter().map(Into::into).collect()
}

/// Visitor over [`Expr`] trees, implemented by backends to evaluate filters.
pub trait QueryVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error>;
    fn visit_exists(&mut self, field: &str) -> Result<Self::Output, Self::Error>;
    fn visit_field(
        &mut self,
        field: &str,
        op: &FieldOp,
        value: &Value,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_expr(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        match expr {
            Expr::And(exprs) => self.visit_and(exprs),
            Expr::Exists(field) => self.visit_exists(field),
            Expr::Field { field, op, value } => self.visit_field(field, op, value),
        }
    }
}
