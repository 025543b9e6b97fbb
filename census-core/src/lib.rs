//! Core of the citizen census service.
//!
//! This crate holds everything that does not depend on a particular database or
//! transport:
//!
//! - **Citizen model** ([`citizen`]) - The stored record, request payloads and list criteria
//! - **Document traits** ([`document`]) - Conversion between typed values and BSON documents
//! - **Store backend abstraction** ([`backend`]) - The operations a storage backend provides
//! - **Query and filtering API** ([`query`]) - Equality filters and result windows
//! - **Pagination** ([`page`]) - Parsing and defaults for `skip` and `limit`
//! - **Collections interface** ([`collection`]) - Typed access to one collection
//! - **Document store** ([`store`]) - The handle shared by request handlers
//! - **Error handling** ([`error`]) - Store and query error types
//!
//! # Example
//!
//! ```ignore
//! use census_core::{citizen::{Citizen, CitizenCriteria}, page::Pagination, query::Query};
//!
//! let filter = CitizenCriteria { city: Some("Pune".into()), ..Default::default() }.to_filter()?;
//! let query = Pagination::default().apply(Query::builder().filter(filter)).build();
//! let citizens = store.typed_collection::<Citizen>().query(query).await?;
//! ```

pub mod backend;
pub mod citizen;
pub mod collection;
pub mod document;
pub mod error;
pub mod page;
pub mod query;
pub mod store;
