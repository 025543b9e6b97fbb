//! Request extractors that reject with [`ApiError`] instead of axum's defaults.
//!
//! axum answers a malformed JSON body with 422 and a plain-text reason; these
//! wrappers turn every extraction failure into the API's 400 JSON errors.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use bson::oid::ObjectId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A JSON request body. Any failure to read or decode it is [`ApiError::InvalidBody`].
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "rejected request body");
                Err(ApiError::InvalidBody)
            }
        }
    }
}

/// Query-string parameters.
///
/// A repeated key keeps its first value, so only values that fail their own
/// parsing are rejected. A query string that cannot be decoded at all is
/// [`ApiError::InvalidQueryParameter`].
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "rejected query string");
                ApiError::InvalidQueryParameter
            })?;

        let mut first = Map::new();
        for (key, value) in pairs {
            first.entry(key).or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(first))
            .map(QueryParams)
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected query parameters");
                ApiError::InvalidQueryParameter
            })
    }
}

/// The `{id}` path segment, parsed as a record identifier.
///
/// Extracted from the request head, so an invalid identifier is reported before
/// the body is read.
#[derive(Debug, Clone, Copy)]
pub struct CitizenId(pub ObjectId);

impl<S> FromRequestParts<S> for CitizenId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidIdentifier)?;

        ObjectId::parse_str(&raw).map(CitizenId).map_err(|_| {
            tracing::debug!(id = %raw, "rejected citizen identifier");
            ApiError::InvalidIdentifier
        })
    }
}
