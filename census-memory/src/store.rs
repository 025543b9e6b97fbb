//! In-memory storage implementation.
//!
//! Documents live in per-collection vectors behind an async-aware read-write
//! lock. Scans preserve insertion order, which gives list queries a stable
//! order for pagination.

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use mea::rwlock::RwLock;
use std::{collections::HashMap, sync::Arc};

use census_core::{
    backend::{StoreBackend, StoreBackendBuilder, UpdateOutcome},
    error::{DocumentStoreError, DocumentStoreResult},
    query::Query,
};

use crate::evaluator::DocumentEvaluator;

const ID_FIELD: &str = "_id";

type CollectionVec = Vec<Document>;
type StoreMap = HashMap<String, CollectionVec>;

/// Thread-safe in-memory document storage backend.
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state; clones
/// share the same data, so a test can keep one handle while the router owns
/// another.
///
/// Queries scan the whole collection.
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection name -> documents in insertion order
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory document store.
    pub fn new() -> Self {
        Self { store: Arc::new(RwLock::new(StoreMap::new())) }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Returns the number of documents stored in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn document_id(document: &Document) -> Option<&ObjectId> {
    match document.get(ID_FIELD) {
        Some(Bson::ObjectId(id)) => Some(id),
        _ => None,
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn insert_document(&self, mut document: Document, collection: &str) -> DocumentStoreResult<ObjectId> {
        if document.contains_key(ID_FIELD) {
            return Err(DocumentStoreError::InvalidDocument(format!(
                "{ID_FIELD} is assigned by the store"
            )));
        }

        let id = ObjectId::new();
        document.insert(ID_FIELD, id);

        self.store
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn query_documents(&self, query: Query, collection: &str) -> DocumentStoreResult<Vec<Document>> {
        let store = self.store.read().await;
        let documents = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        let offset = usize::try_from(query.offset.unwrap_or(0)).unwrap_or(usize::MAX);
        let limit = match query.limit {
            Some(limit) => usize::try_from(limit).unwrap_or(usize::MAX),
            None => usize::MAX,
        };

        Ok(
            documents
                .iter()
                .filter(|doc| DocumentEvaluator::matches(doc, &query.filter))
                .skip(offset)
                .take(limit)
                .cloned()
                .collect()
        )
    }

    async fn update_document(&self, id: ObjectId, fields: Document, collection: &str) -> DocumentStoreResult<UpdateOutcome> {
        if fields.contains_key(ID_FIELD) {
            return Err(DocumentStoreError::InvalidDocument(format!(
                "{ID_FIELD} cannot be updated"
            )));
        }

        let mut store = self.store.write().await;
        let target = store
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|doc| document_id(doc) == Some(&id)));

        let document = match target {
            Some(doc) => doc,
            None => return Ok(UpdateOutcome::default()),
        };

        // Only a change to the stored content counts as a modification.
        let mut changed = false;
        for (field, value) in fields {
            if document.get(&field) != Some(&value) {
                document.insert(field, value);
                changed = true;
            }
        }

        Ok(UpdateOutcome { matched: 1, modified: u64::from(changed) })
    }

    async fn delete_document(&self, id: ObjectId, collection: &str) -> DocumentStoreResult<u64> {
        let mut store = self.store.write().await;
        let documents = match store.get_mut(collection) {
            Some(col) => col,
            None => return Ok(0),
        };

        match documents.iter().position(|doc| document_id(doc) == Some(&id)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> DocumentStoreResult<()> {
        Ok(())
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Always succeeds with a freshly initialized store.
    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use census_core::query::Filter;

    const CITIZENS: &str = "citizens";

    async fn seeded() -> (InMemoryStore, Vec<ObjectId>) {
        let store = InMemoryStore::builder().build().await.unwrap();
        let mut ids = Vec::new();

        for (first_name, city) in [("Asha", "Pune"), ("Ravi", "Nagpur"), ("Meera", "Pune")] {
            let id = store
                .insert_document(doc! { "firstName": first_name, "city": city }, CITIZENS)
                .await
                .unwrap();
            ids.push(id);
        }

        (store, ids)
    }

    fn names(documents: &[Document]) -> Vec<&str> {
        documents
            .iter()
            .map(|doc| doc.get_str("firstName").unwrap())
            .collect()
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids() {
        let (store, ids) = seeded().await;

        assert_eq!(store.count(CITIZENS).await, 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    #[tokio::test]
    async fn insert_rejects_caller_supplied_id() {
        let store = InMemoryStore::new();
        let result = store
            .insert_document(doc! { "_id": ObjectId::new(), "city": "Pune" }, CITIZENS)
            .await;

        assert!(matches!(result, Err(DocumentStoreError::InvalidDocument(_))));
    }

    #[tokio::test]
    async fn query_filters_in_insertion_order() {
        let (store, ids) = seeded().await;
        let query = Query::builder().filter(Filter::new().eq("city", "Pune")).build();

        let found = store.query_documents(query, CITIZENS).await.unwrap();

        assert_eq!(names(&found), vec!["Asha", "Meera"]);
        assert_eq!(found[0].get_object_id("_id").unwrap(), ids[0]);
    }

    #[tokio::test]
    async fn query_applies_window() {
        let (store, _) = seeded().await;

        let page = store
            .query_documents(Query::builder().offset(1).limit(1).build(), CITIZENS)
            .await
            .unwrap();
        assert_eq!(names(&page), vec!["Ravi"]);

        let empty = store
            .query_documents(Query::builder().limit(0).build(), CITIZENS)
            .await
            .unwrap();
        assert!(empty.is_empty());

        let past_end = store
            .query_documents(Query::builder().offset(10).build(), CITIZENS)
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn query_missing_collection_is_empty() {
        let store = InMemoryStore::new();

        assert!(store.query_documents(Query::new(), "nothing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_sets_fields_and_keeps_others() {
        let (store, ids) = seeded().await;

        let outcome = store
            .update_document(ids[1], doc! { "city": "Mumbai", "state": "MH" }, CITIZENS)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 1 });

        let found = store
            .query_documents(Query::builder().filter(Filter::new().eq("_id", ids[1])).build(), CITIZENS)
            .await
            .unwrap();
        assert_eq!(found[0].get_str("firstName").unwrap(), "Ravi");
        assert_eq!(found[0].get_str("city").unwrap(), "Mumbai");
        assert_eq!(found[0].get_str("state").unwrap(), "MH");
    }

    #[tokio::test]
    async fn update_with_identical_values_modifies_nothing() {
        let (store, ids) = seeded().await;

        let outcome = store
            .update_document(ids[0], doc! { "city": "Pune" }, CITIZENS)
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome { matched: 1, modified: 0 });
    }

    #[tokio::test]
    async fn update_unknown_id_matches_nothing() {
        let (store, _) = seeded().await;

        let outcome = store
            .update_document(ObjectId::new(), doc! { "city": "Goa" }, CITIZENS)
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::default());
    }

    #[tokio::test]
    async fn delete_removes_once() {
        let (store, ids) = seeded().await;

        assert_eq!(store.delete_document(ids[0], CITIZENS).await.unwrap(), 1);
        assert_eq!(store.delete_document(ids[0], CITIZENS).await.unwrap(), 0);
        assert_eq!(store.count(CITIZENS).await, 2);
        assert_eq!(store.delete_document(ids[0], "nothing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();

        store.insert_document(doc! { "city": "Pune" }, CITIZENS).await.unwrap();

        assert_eq!(other.count(CITIZENS).await, 1);
        other.ping().await.unwrap();
    }
}
