//! Core traits for document representation.
//!
//! A stored type implements [`Document`]: it names its collection, exposes its
//! store-assigned identifier, and rebuilds itself from a raw BSON document.
//! Anything that can be written to a collection (a full record, a creation
//! payload, a partial update) implements [`ToDocument`].

use bson::{Document as BsonDocument, oid::ObjectId};

use crate::error::DocumentStoreResult;

/// Conversion of a value into the BSON document written to the store.
///
/// The produced document never carries `_id`; identifiers are assigned and
/// addressed by the store.
pub trait ToDocument: Send + Sync {
    fn to_document(&self) -> DocumentStoreResult<BsonDocument>;
}

/// Core trait that all documents read from a document store must implement.
///
/// # Example
///
/// ```ignore
/// use census_core::document::Document;
/// use bson::{Document as BsonDocument, oid::ObjectId};
///
/// pub struct Tag {
///     pub id: ObjectId,
///     pub label: String,
/// }
///
/// impl Document for Tag {
///     fn id(&self) -> &ObjectId {
///         &self.id
///     }
///
///     fn collection_name() -> &'static str {
///         "tags"
///     }
///
///     fn from_document(document: BsonDocument) -> DocumentStoreResult<Self> {
///         /* ... */
///     }
/// }
/// ```
pub trait Document: Send + Sync + Sized + 'static {
    /// Returns a reference to this document's store-assigned identifier.
    fn id(&self) -> &ObjectId;

    /// Returns the name of the collection this document belongs to.
    fn collection_name() -> &'static str;

    /// Builds the document from its stored form, `_id` included.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentStoreError::InvalidDocument`](crate::error::DocumentStoreError::InvalidDocument)
    /// if a field has an unexpected type or the identifier is missing.
    fn from_document(document: BsonDocument) -> DocumentStoreResult<Self>;
}
