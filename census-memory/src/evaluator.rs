//! Filter evaluation for in-memory document matching.
//!
//! Equality follows the store's comparison rules closely enough for this
//! service: numbers compare by value regardless of width, datetimes by
//! instant, and values of different kinds never match.

use bson::{Bson, DateTime, Document as BsonDocument, oid::ObjectId};

use census_core::{
    error::DocumentStoreError,
    query::{Clause, Filter, FilterVisitor},
};

/// Comparable view of a BSON value.
///
/// Integers and doubles are normalized to `f64`.
#[derive(Debug, PartialEq)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    ObjectId(ObjectId),
    /// Kinds this backend never stores for citizens.
    Other(&'a Bson),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(f64::from(*value)),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::ObjectId(value) => Comparable::ObjectId(*value),
            other => Comparable::Other(other),
        }
    }
}

pub(crate) struct DocumentEvaluator<'a> {
    document: &'a BsonDocument,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a BsonDocument) -> Self {
        Self { document }
    }

    /// Returns whether the document satisfies every clause of `filter`.
    pub fn matches(document: &'a BsonDocument, filter: &Filter) -> bool {
        DocumentEvaluator::new(document)
            .visit_filter(filter)
            .unwrap_or(false)
    }
}

impl<'a> FilterVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<bool, DocumentStoreError> {
        Ok(match self.document.get(field) {
            Some(stored) => Comparable::from(stored) == Comparable::from(value),
            None => false,
        })
    }

    fn visit_all(&mut self, clauses: &[Clause]) -> Result<bool, DocumentStoreError> {
        for clause in clauses {
            if !self.visit_eq(&clause.field, &clause.value)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn citizen() -> BsonDocument {
        doc! {
            "_id": ObjectId::new(),
            "firstName": "Asha",
            "city": "Pune",
            "pincode": 411001_i32,
            "dateOfBirth": DateTime::from_millis(639_878_400_000),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(DocumentEvaluator::matches(&citizen(), &Filter::new()));
        assert!(DocumentEvaluator::matches(&BsonDocument::new(), &Filter::new()));
    }

    #[test]
    fn numbers_compare_across_widths() {
        let filter = Filter::new().eq("pincode", 411001_i64);

        assert!(DocumentEvaluator::matches(&citizen(), &filter));
        assert!(!DocumentEvaluator::matches(&citizen(), &Filter::new().eq("pincode", 411002_i64)));
    }

    #[test]
    fn every_clause_must_match() {
        let both = Filter::new().eq("firstName", "Asha").eq("city", "Pune");
        let one_wrong = Filter::new().eq("firstName", "Asha").eq("city", "Nagpur");

        assert!(DocumentEvaluator::matches(&citizen(), &both));
        assert!(!DocumentEvaluator::matches(&citizen(), &one_wrong));
    }

    #[test]
    fn missing_field_or_other_kind_does_not_match() {
        assert!(!DocumentEvaluator::matches(&citizen(), &Filter::new().eq("state", "Goa")));
        assert!(!DocumentEvaluator::matches(&citizen(), &Filter::new().eq("pincode", "411001")));
        assert!(!DocumentEvaluator::matches(&citizen(), &Filter::new().eq("dateOfBirth", "1990-04-12")));
    }

    #[test]
    fn datetimes_compare_by_instant() {
        let filter = Filter::new().eq("dateOfBirth", DateTime::from_millis(639_878_400_000));

        assert!(DocumentEvaluator::matches(&citizen(), &filter));
    }
}
