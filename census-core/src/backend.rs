//! Storage backend abstraction for the document store.
//!
//! The [`StoreBackend`] trait is the seam between request handling and a concrete
//! database. It exposes exactly the collection-level operations the citizen API
//! needs: insert with a generated identifier, bounded filtered find, partial
//! update by identifier, delete by identifier, and a liveness check.
//!
//! # Examples
//!
//! ```ignore
//! use census_core::backend::StoreBackend;
//! use bson::doc;
//!
//! let backend = MyBackendImpl::new();
//!
//! let id = backend.insert_document(doc! { "city": "Pune" }, "citizens").await?;
//! let outcome = backend.update_document(id, doc! { "city": "Nagpur" }, "citizens").await?;
//! assert_eq!(outcome.modified, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::{Document, oid::ObjectId};
use std::fmt::Debug;

use crate::{error::DocumentStoreResult, query::Query};

/// Match and modification counts reported by a partial update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents whose identifier matched.
    pub matched: u64,
    /// Documents whose stored content actually changed.
    pub modified: u64,
}

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// Implementations are shared by every in-flight request and must support
/// concurrent calls through `&self`.
///
/// # Error Handling
///
/// Store failures are reported as [`DocumentStoreError`](crate::error::DocumentStoreError).
/// Zero matches on update or delete are not errors; they are reported through the
/// returned counts so callers can decide.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Inserts a document and returns the identifier the store generated for it.
    ///
    /// # Arguments
    ///
    /// * `document` - The document body, without `_id`
    /// * `collection` - The collection to insert into, created on first use
    async fn insert_document(
        &self,
        document: Document,
        collection: &str,
    ) -> DocumentStoreResult<ObjectId>;

    /// Returns the documents matching `query.filter`, skipping `query.offset` of
    /// them and returning at most `query.limit`.
    ///
    /// Returned documents include their `_id`. A limit of zero yields an empty
    /// result. A missing collection yields an empty result.
    async fn query_documents(
        &self,
        query: Query,
        collection: &str,
    ) -> DocumentStoreResult<Vec<Document>>;

    /// Sets every field of `fields` on the document identified by `id`, leaving
    /// other fields untouched.
    ///
    /// The update is atomic per document. An empty `fields` document modifies
    /// nothing.
    async fn update_document(
        &self,
        id: ObjectId,
        fields: Document,
        collection: &str,
    ) -> DocumentStoreResult<UpdateOutcome>;

    /// Deletes the document identified by `id` and returns how many were removed.
    async fn delete_document(&self, id: ObjectId, collection: &str) -> DocumentStoreResult<u64>;

    /// Verifies that the store is reachable.
    async fn ping(&self) -> DocumentStoreResult<()>;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op.
    async fn shutdown(self) -> DocumentStoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// Factory for backend instances, used at process startup.
#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend>;
}
