//! MongoDB storage backend for the census service.
//!
//! [`MongoDbStore`] implements [`StoreBackend`](census_core::backend::StoreBackend)
//! over one database of a MongoDB deployment. Filters are translated to native
//! query documents, identifiers are generated by the server, and partial updates
//! use `$set`.
//!
//! # Example
//!
//! ```ignore
//! use census_core::backend::StoreBackendBuilder;
//! use census_mongodb::MongoDbStore;
//!
//! let backend = MongoDbStore::builder("mongodb://localhost:27017", "citizen-management")
//!     .build()
//!     .await?;
//! backend.ping().await?;
//! ```

mod query;
pub mod store;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
