//! In-memory storage backend for the census service.
//!
//! [`InMemoryStore`] implements [`StoreBackend`](census_core::backend::StoreBackend)
//! over process memory. It keeps documents in insertion order, generates
//! identifiers the way the database does, and follows the same update and
//! delete counting rules, so request handlers behave identically against it.
//! It backs the API tests and local runs without a database.
//!
//! # Quick Start
//!
//! ```ignore
//! use census_core::{citizen::Citizen, store::DocumentStore};
//! use census_memory::InMemoryStore;
//!
//! let store = DocumentStore::new(InMemoryStore::new());
//! let citizens = store.typed_collection::<Citizen>();
//! let id = citizens.insert(&new_citizen).await?;
//! ```

mod evaluator;
pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
