//! JSON REST API for citizen records.
//!
//! Exposes an axum [`Router`] backed by a [`DocumentStore`] over any
//! [`StoreBackend`]. Transport concerns (listener, CORS, request tracing) are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = census_api::api_router(Arc::new(DocumentStore::new(backend)))
//!     .layer(TraceLayer::new_for_http());
//! ```

pub mod citizens;
pub mod error;
pub mod extract;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use census_core::{backend::StoreBackend, store::DocumentStore};

pub use error::ApiError;

/// Builds the API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<B>(store: Arc<DocumentStore<B>>) -> Router<()>
where
    B: StoreBackend + 'static,
{
    Router::new()
        .route("/api/add", post(citizens::create::<B>))
        .route("/api/citizens", get(citizens::list::<B>))
        .route("/api/edit/{id}", patch(citizens::update::<B>))
        .route("/api/delete/{id}", delete(citizens::remove::<B>))
        .with_state(store)
}
