//! Filter expression evaluation for in-memory document filtering.
//!
//! Field paths from [`fields`] are resolved against a typed [`Document`] and compared
//! with the literal operands of the expression.

use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use docstore_core::{
    document::Document,
    error::{DocumentStoreError, DocumentStoreResult},
    query::{Expr, FieldOp, QueryVisitor, Value, fields},
};

/// Borrowed, comparable view of a document field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Comparable<'a> {
    String(&'a str),
    DateTime(DateTime<Utc>),
}

impl<'a> Comparable<'a> {
    /// Resolves a field path, returning `None` when the field is absent.
    pub fn resolve(document: &'a Document, field: &str) -> Option<Self> {
        match field {
            fields::TITLE => document.title.as_deref().map(Comparable::String),
            fields::CONTENT => document.content.as_deref().map(Comparable::String),
            fields::AUTHOR_ID => document
                .author
                .as_ref()
                .and_then(|author| author.id.as_deref())
                .map(Comparable::String),
            fields::CREATED => document.created.map(Comparable::DateTime),
            _ => None,
        }
    }

    fn matches(&self, value: &Value) -> bool {
        self.compare(value) == Some(Ordering::Equal)
    }

    fn compare(&self, value: &Value) -> Option<Ordering> {
        match (self, value) {
            (Comparable::String(left), Value::String(right)) => Some((*left).cmp(right.as_str())),
            (Comparable::DateTime(left), Value::DateTime(right)) => Some(left.cmp(right)),
            _ => None,
        }
    }
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Document,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Document>,
        expr: &Expr,
    ) -> DocumentStoreResult<Vec<Document>> {
        let mut matched = Vec::new();

        for document in documents {
            if DocumentEvaluator::new(document).evaluate(expr)? {
                matched.push(document.clone());
            }
        }

        Ok(matched)
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_exists(&mut self, field: &str) -> Result<Self::Output, Self::Error> {
        Ok(Comparable::resolve(self.document, field).is_some())
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Value) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = Comparable::resolve(self.document, field) else {
            return Ok(false);
        };

        match op {
            FieldOp::Gt => Ok(field_value.compare(value) == Some(Ordering::Greater)),
            FieldOp::Lt => Ok(field_value.compare(value) == Some(Ordering::Less)),
            FieldOp::AnyOf => match value {
                Value::Array(values) => Ok(values.iter().any(|candidate| field_value.matches(candidate))),
                _ => Ok(false),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use docstore_core::{
        document::Author,
        query::{Filter, SearchRequest},
    };

    fn document() -> Document {
        Document::builder()
            .id("1")
            .title("Title One")
            .content("Content One")
            .author(Author::new("1", "Author One"))
            .created(Utc::now())
            .build()
    }

    fn evaluate(document: &Document, expr: &Expr) -> bool {
        DocumentEvaluator::new(document).evaluate(expr).unwrap()
    }

    #[test]
    fn resolves_nested_author_id() {
        let document = document();

        assert_eq!(
            Comparable::resolve(&document, fields::AUTHOR_ID),
            Some(Comparable::String("1"))
        );
        assert_eq!(Comparable::resolve(&document, "author.name"), None);
        assert_eq!(Comparable::resolve(&document, "unknown"), None);
    }

    #[test]
    fn any_of_is_exact_membership() {
        let document = document();

        assert!(evaluate(&document, &Filter::any_of(fields::TITLE, vec!["Other", "Title One"])));
        assert!(!evaluate(&document, &Filter::any_of(fields::TITLE, vec!["Title"])));
        assert!(!evaluate(&document, &Filter::any_of(fields::CONTENT, vec!["Content"])));
    }

    #[test]
    fn range_bounds_are_exclusive() {
        let document = document();
        let created = document.created.unwrap();

        assert!(!evaluate(&document, &Filter::gt(fields::CREATED, created)));
        assert!(!evaluate(&document, &Filter::lt(fields::CREATED, created)));
        assert!(evaluate(&document, &Filter::gt(fields::CREATED, created - Duration::seconds(1))));
        assert!(evaluate(&document, &Filter::lt(fields::CREATED, created + Duration::seconds(1))));
    }

    #[test]
    fn mismatched_operand_types_never_match() {
        let document = document();

        assert!(!evaluate(&document, &Filter::gt(fields::TITLE, Utc::now())));
        assert!(!evaluate(&document, &Filter::any_of(fields::CREATED, vec!["Title One"])));
    }

    #[test]
    fn absent_fields_fail_comparisons_and_presence() {
        let document = Document::builder().title("Title").build();

        assert!(!evaluate(&document, &Filter::any_of(fields::AUTHOR_ID, vec!["1"])));
        assert!(!evaluate(&document, &Filter::exists(fields::AUTHOR_ID)));
        assert!(!evaluate(&document, &Filter::exists(fields::CREATED)));
        assert!(evaluate(&document, &Filter::exists(fields::TITLE)));
    }

    #[test]
    fn any_of_with_scalar_operand_matches_nothing() {
        let document = document();
        let expr = Expr::field(fields::TITLE.to_string(), FieldOp::AnyOf, Value::from("Title One"));

        assert!(!evaluate(&document, &expr));
    }

    #[test]
    fn document_without_author_fails_any_request() {
        let mut document = document();
        document.author = None;

        assert!(!evaluate(&document, &SearchRequest::default().to_filter()));
    }

    #[test]
    fn author_without_id_fails_any_request() {
        let mut document = document();
        document.author = Some(Author {
            id: None,
            name: Some("Nameless".to_string()),
        });

        assert!(!evaluate(&document, &SearchRequest::default().to_filter()));
    }

    #[test]
    fn filter_documents_keeps_only_matches() {
        let keep = document();
        let mut drop = document();
        drop.title = Some("Other".to_string());

        let matched = DocumentEvaluator::filter_documents(
            [&keep, &drop],
            &SearchRequest::builder().title_prefixes(["Title One"]).build().to_filter(),
        )
        .unwrap();

        assert_eq!(matched, vec![keep]);
    }
}
