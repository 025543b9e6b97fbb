//! Error types and result types for document store operations and list queries.
//!
//! Store operations return [`DocumentStoreResult<T>`]. Building a filter or a
//! pagination window from request parameters returns [`QueryError`] on failure,
//! before any store is touched.

use std::fmt;

use thiserror::Error;

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum DocumentStoreError {
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A stored document does not have the shape its type expects.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type DocumentStoreResult<T> = Result<T, DocumentStoreError>;

/// Which pagination parameter failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParam {
    Skip,
    Limit,
}

impl fmt::Display for PageParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageParam::Skip => f.write_str("skip"),
            PageParam::Limit => f.write_str("limit"),
        }
    }
}

/// Errors raised while turning list request parameters into a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A filter parameter could not be coerced to its field's type.
    #[error("invalid value {value:?} for query parameter {name}")]
    InvalidParameter { name: &'static str, value: String },
    /// `skip` or `limit` is not a non-negative integer.
    #[error("invalid {param} value {value:?}")]
    InvalidPagination { param: PageParam, value: String },
}
