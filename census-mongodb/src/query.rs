//! Filter translation to MongoDB query documents.

use bson::{Bson, Document, doc};

use census_core::{
    error::DocumentStoreError,
    query::{Clause, FilterVisitor},
};

/// Translates equality filters into MongoDB query documents.
///
/// No clauses become `{}`, a single clause becomes `{field: {$eq: value}}`, and
/// several become an `$and` of single-clause documents, keeping clause order.
pub(crate) struct MongoFilterTranslator;

impl FilterVisitor for MongoFilterTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_eq(&mut self, field: &str, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: { "$eq": value.clone() },
        })
    }

    fn visit_all(&mut self, clauses: &[Clause]) -> Result<Self::Output, Self::Error> {
        if clauses.is_empty() {
            return Ok(Document::new());
        }

        Ok(doc! {
            "$and": clauses
                .iter()
                .map(|clause| self.visit_eq(&clause.field, &clause.value))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}
