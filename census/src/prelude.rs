//! Re-exports of the most commonly used types.
//!
//! ```ignore
//! use census::prelude::*;
//! ```

pub use std::sync::Arc;

pub use census_core::{
    backend::{StoreBackend, StoreBackendBuilder, UpdateOutcome},
    citizen::{Citizen, CitizenCriteria, CitizenPatch, NewCitizen},
    collection::TypedCollection,
    document::{Document, ToDocument},
    error::{DocumentStoreError, DocumentStoreResult, QueryError},
    page::Pagination,
    query::{Filter, Query, QueryBuilder},
    store::DocumentStore,
};
