//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use census_core::error::{DocumentStoreError, PageParam, QueryError};
use serde_json::json;
use thiserror::Error;

/// The store write that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Insert,
    Update,
    Delete,
}

impl WriteOp {
    fn failure_message(self) -> &'static str {
        match self {
            WriteOp::Insert => "unable to add citizen",
            WriteOp::Update => "unable to update citizen",
            WriteOp::Delete => "unable to delete citizen",
        }
    }
}

fn pagination_message(param: &PageParam) -> &'static str {
    match param {
        PageParam::Skip => "invalid skip number",
        PageParam::Limit => "invalid limit value",
    }
}

/// An error returned by an API handler.
///
/// The display text is the `error` message sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body")]
    InvalidBody,

    #[error("invalid query parameter")]
    InvalidQueryParameter,

    #[error("{}", pagination_message(.0))]
    InvalidPaginationValue(PageParam),

    #[error("invalid citizen ID")]
    InvalidIdentifier,

    #[error("citizen not found")]
    RecordNotFound,

    #[error("{}", .0.failure_message())]
    StoreWrite(WriteOp, #[source] DocumentStoreError),

    #[error("unable to fetch documents")]
    StoreRead(#[source] DocumentStoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RecordNotFound => StatusCode::NOT_FOUND,
            // Failed inserts are reported as a bad request.
            ApiError::StoreWrite(WriteOp::Insert, _) => StatusCode::BAD_REQUEST,
            ApiError::StoreWrite(..) | ApiError::StoreRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody
            | ApiError::InvalidQueryParameter
            | ApiError::InvalidPaginationValue(_)
            | ApiError::InvalidIdentifier => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        tracing::debug!(error = %err, "rejected list parameters");

        match err {
            QueryError::InvalidParameter { .. } => ApiError::InvalidQueryParameter,
            QueryError::InvalidPagination { param, .. } => ApiError::InvalidPaginationValue(param),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::StoreWrite(_, source) | ApiError::StoreRead(source) => {
                tracing::error!(error = %source, "{self}");
            }
            _ => tracing::debug!("{self}"),
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_format() {
        assert_eq!(ApiError::InvalidPaginationValue(PageParam::Skip).to_string(), "invalid skip number");
        assert_eq!(ApiError::InvalidPaginationValue(PageParam::Limit).to_string(), "invalid limit value");
        assert_eq!(
            ApiError::StoreWrite(WriteOp::Delete, DocumentStoreError::Backend("down".into())).to_string(),
            "unable to delete citizen"
        );
    }

    #[test]
    fn insert_failure_is_a_bad_request() {
        let insert = ApiError::StoreWrite(WriteOp::Insert, DocumentStoreError::Backend("dup".into()));
        let update = ApiError::StoreWrite(WriteOp::Update, DocumentStoreError::Backend("down".into()));

        assert_eq!(insert.status(), StatusCode::BAD_REQUEST);
        assert_eq!(update.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::RecordNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn query_errors_map_to_request_errors() {
        let param = QueryError::InvalidParameter { name: "pin", value: "abc".into() };
        let page = QueryError::InvalidPagination { param: PageParam::Limit, value: "-1".into() };

        assert!(matches!(ApiError::from(param), ApiError::InvalidQueryParameter));
        assert!(matches!(ApiError::from(page), ApiError::InvalidPaginationValue(PageParam::Limit)));
    }
}
