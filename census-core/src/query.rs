//! Query construction for document stores.
//!
//! A [`Filter`] is a conjunction of equality clauses. It carries no store-specific
//! syntax; each backend translates it through a [`FilterVisitor`].
//!
//! # Query Building
//!
//! ```ignore
//! use census_core::query::{Filter, Query};
//!
//! let query = Query::builder()
//!     .filter(Filter::new().eq("city", "Pune").eq("pincode", 411001))
//!     .offset(20)
//!     .limit(10)
//!     .build();
//! ```

use bson::Bson;

use crate::error::DocumentStoreError;

/// A single `field == value` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    /// The stored field name.
    pub field: String,
    /// The value the field must equal.
    pub value: Bson,
}

/// A conjunction of equality clauses.
///
/// An empty filter matches every document. Clauses keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    /// Creates an empty filter, matching every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality clause and returns the filter.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.push(field, value);
        self
    }

    /// Adds an equality clause in place.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<Bson>) {
        self.clauses.push(Clause { field: field.into(), value: value.into() });
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the value constrained for `field`, if any.
    pub fn value_of(&self, field: &str) -> Option<&Bson> {
        self.clauses
            .iter()
            .find(|clause| clause.field == field)
            .map(|clause| &clause.value)
    }
}

/// A structured query: a filter plus an optional result window.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Equality constraints to match documents against.
    pub filter: Filter,
    /// Maximum number of documents to return. `Some(0)` returns nothing.
    pub limit: Option<u64>,
    /// Number of matching documents to skip.
    pub offset: Option<u64>,
}

impl Query {
    /// Creates a query with no constraints and no window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new query builder for fluent construction.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new query builder.
    pub fn new() -> Self {
        QueryBuilder { query: Query::default() }
    }

    /// Sets the filter for this query.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.filter = filter;
        self
    }

    /// Sets the maximum number of documents to return.
    pub fn limit(mut self, limit: u64) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Sets the number of documents to skip.
    pub fn offset(mut self, offset: u64) -> Self {
        self.query.offset = Some(offset);
        self
    }

    /// Builds and returns the final query.
    pub fn build(self) -> Query {
        self.query
    }
}

/// Translates a [`Filter`] into a backend's native representation.
///
/// Implementors decide how a single clause is expressed and how clauses are
/// combined; [`visit_filter`](FilterVisitor::visit_filter) drives the walk.
pub trait FilterVisitor {
    type Output;
    type Error: Into<DocumentStoreError>;

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error>;
    fn visit_all(&mut self, clauses: &[Clause]) -> Result<Self::Output, Self::Error>;

    fn visit_filter(&mut self, filter: &Filter) -> Result<Self::Output, Self::Error> {
        match filter.clauses() {
            [single] => self.visit_eq(&single.field, &single.value),
            clauses => self.visit_all(clauses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_clauses() {
        let filter = Filter::new();

        assert!(filter.is_empty());
        assert_eq!(filter.len(), 0);
    }

    #[test]
    fn clauses_keep_insertion_order() {
        let filter = Filter::new()
            .eq("lastName", "Rao")
            .eq("pincode", 411001_i64);

        let fields: Vec<&str> = filter
            .clauses()
            .iter()
            .map(|c| c.field.as_str())
            .collect();
        assert_eq!(fields, vec!["lastName", "pincode"]);
        assert_eq!(filter.value_of("pincode"), Some(&Bson::Int64(411001)));
        assert_eq!(filter.value_of("city"), None);
    }

    #[test]
    fn builder_sets_window() {
        let query = Query::builder()
            .filter(Filter::new().eq("city", "Pune"))
            .offset(5)
            .limit(0)
            .build();

        assert_eq!(query.offset, Some(5));
        assert_eq!(query.limit, Some(0));
        assert_eq!(query.filter.len(), 1);
    }

    struct Counter;

    impl FilterVisitor for Counter {
        type Output = usize;
        type Error = DocumentStoreError;

        fn visit_eq(&mut self, _field: &str, _value: &Bson) -> Result<usize, DocumentStoreError> {
            Ok(1)
        }

        fn visit_all(&mut self, clauses: &[Clause]) -> Result<usize, DocumentStoreError> {
            Ok(clauses.len() * 10)
        }
    }

    #[test]
    fn visitor_dispatches_single_clause_to_visit_eq() {
        assert_eq!(Counter.visit_filter(&Filter::new()).unwrap(), 0);
        assert_eq!(Counter.visit_filter(&Filter::new().eq("a", 1)).unwrap(), 1);
        assert_eq!(
            Counter
                .visit_filter(&Filter::new().eq("a", 1).eq("b", 2))
                .unwrap(),
            20
        );
    }
}
