//! Handlers for the citizen endpoints.
//!
//! | Method   | Path                | Notes |
//! |----------|---------------------|-------|
//! | `POST`   | `/api/add`          | Body: full citizen; 201 with the created record |
//! | `GET`    | `/api/citizens`     | Optional `fn ln dob gd ad ct st pin skip limit` |
//! | `PATCH`  | `/api/edit/{id}`    | Body: any subset of fields; 404 if nothing changed |
//! | `DELETE` | `/api/delete/{id}`  | 404 if not found |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use census_core::{
    backend::StoreBackend,
    citizen::{Citizen, CitizenCriteria, CitizenPatch, NewCitizen},
    page::Pagination,
    query::Query,
    store::DocumentStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::{ApiError, WriteOp},
    extract::{CitizenId, JsonBody, QueryParams},
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/add`
pub async fn create<B: StoreBackend>(
    State(store): State<Arc<DocumentStore<B>>>,
    JsonBody(body): JsonBody<NewCitizen>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(missing) = body.validate() {
        tracing::debug!(%missing, "rejected new citizen");
        return Err(ApiError::InvalidBody);
    }

    let id = store
        .typed_collection::<Citizen>()
        .insert(&body)
        .await
        .map_err(|e| ApiError::StoreWrite(WriteOp::Insert, e))?;

    tracing::info!(%id, "citizen added");
    Ok((StatusCode::CREATED, Json(body.into_citizen(id))))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Result window parameters, kept as text so parse failures can name the
/// offending parameter.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub skip: Option<String>,
    pub limit: Option<String>,
}

/// `GET /api/citizens[?fn=..&ln=..&dob=..&gd=..&ad=..&ct=..&st=..&pin=..&skip=..&limit=..]`
pub async fn list<B: StoreBackend>(
    State(store): State<Arc<DocumentStore<B>>>,
    QueryParams(criteria): QueryParams<CitizenCriteria>,
    QueryParams(page): QueryParams<PageParams>,
) -> Result<Json<Vec<Citizen>>, ApiError> {
    let pagination = Pagination::parse(page.skip.as_deref(), page.limit.as_deref())?;
    let filter = criteria.to_filter()?;

    let query = pagination.apply(Query::builder().filter(filter)).build();
    let citizens = store
        .typed_collection::<Citizen>()
        .query(query)
        .await
        .map_err(ApiError::StoreRead)?;

    Ok(Json(citizens))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /api/edit/{id}`
pub async fn update<B: StoreBackend>(
    State(store): State<Arc<DocumentStore<B>>>,
    CitizenId(id): CitizenId,
    JsonBody(patch): JsonBody<CitizenPatch>,
) -> Result<Json<Value>, ApiError> {
    let outcome = store
        .typed_collection::<Citizen>()
        .update(id, &patch)
        .await
        .map_err(|e| ApiError::StoreWrite(WriteOp::Update, e))?;

    if outcome.modified == 0 {
        tracing::debug!(%id, matched = outcome.matched, "update changed nothing");
        return Err(ApiError::RecordNotFound);
    }

    tracing::info!(%id, "citizen updated");
    Ok(Json(json!({ "message": "citizen updated successfully" })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/delete/{id}`
pub async fn remove<B: StoreBackend>(
    State(store): State<Arc<DocumentStore<B>>>,
    CitizenId(id): CitizenId,
) -> Result<Json<Value>, ApiError> {
    let deleted = store
        .typed_collection::<Citizen>()
        .delete(id)
        .await
        .map_err(|e| ApiError::StoreWrite(WriteOp::Delete, e))?;

    if deleted == 0 {
        return Err(ApiError::RecordNotFound);
    }

    tracing::info!(%id, "citizen deleted");
    Ok(Json(json!({ "message": "citizen deleted successfully" })))
}
