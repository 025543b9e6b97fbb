//! Typed collection access.
//!
//! A [`TypedCollection`] binds a backend reference to one document type and its
//! collection name, converting between typed values and stored BSON documents.
//!
//! # Example
//!
//! ```ignore
//! let citizens = store.typed_collection::<Citizen>();
//! let id = citizens.insert(&new_citizen).await?;
//! let found = citizens.query(Query::builder().filter(filter).build()).await?;
//! ```

use bson::oid::ObjectId;
use std::marker::PhantomData;

use crate::{
    backend::{StoreBackend, UpdateOutcome},
    document::{Document, ToDocument},
    error::DocumentStoreResult,
    query::Query,
};

#[derive(Debug)]
pub struct TypedCollection<'a, B: StoreBackend, D: Document> {
    name: String,
    backend: &'a B,
    _marker: PhantomData<D>,
}

impl<'a, B: StoreBackend, D: Document> TypedCollection<'a, B, D> {
    pub(crate) fn new(name: String, backend: &'a B) -> Self {
        Self { name, backend, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a new document and returns its store-generated identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if conversion or insertion fails.
    pub async fn insert(&self, draft: &impl ToDocument) -> DocumentStoreResult<ObjectId> {
        self.backend
            .insert_document(draft.to_document()?, self.name())
            .await
    }

    /// Queries documents using a filter and result window.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentStoreError`](crate::error::DocumentStoreError) if the query fails or a
    /// stored document cannot be read back as `D`.
    pub async fn query(&self, query: Query) -> DocumentStoreResult<Vec<D>> {
        self.backend
            .query_documents(query, self.name())
            .await?
            .into_iter()
            .map(D::from_document)
            .collect::<DocumentStoreResult<Vec<D>>>()
    }

    /// Applies the fields of `changes` to the document identified by `id`.
    ///
    /// When `changes` converts to an empty document the backend is not called and
    /// the outcome reports nothing matched or modified.
    pub async fn update(
        &self,
        id: ObjectId,
        changes: &impl ToDocument,
    ) -> DocumentStoreResult<UpdateOutcome> {
        let fields = changes.to_document()?;

        if fields.is_empty() {
            return Ok(UpdateOutcome::default());
        }

        self.backend
            .update_document(id, fields, self.name())
            .await
    }

    /// Deletes the document identified by `id`, returning how many were removed.
    pub async fn delete(&self, id: ObjectId) -> DocumentStoreResult<u64> {
        self.backend
            .delete_document(id, self.name())
            .await
    }
}
