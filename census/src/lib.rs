//! Citizen records over a JSON document store.
//!
//! This crate ties the workspace together: it re-exports the core model and
//! store abstraction, the storage backends and the HTTP API, and assembles the
//! served [`app`] with request tracing and CORS.
//!
//! # Quick Start
//!
//! ```ignore
//! use census::{prelude::*, memory::InMemoryStore};
//!
//! let store = Arc::new(DocumentStore::new(InMemoryStore::new()));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, census::app(store)).await?;
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-process storage for tests and local runs
//! - [`mongodb`] - MongoDB storage (requires the `mongodb` feature)

pub mod config;
pub mod prelude;

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use census_api as api;
pub use census_core::{backend, citizen, collection, document, error, page, query, store};

pub use bson;

/// In-memory storage backend.
pub mod memory {
    pub use census_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use census_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}

/// Builds the served application: the API routes with request tracing and
/// cross-origin access from any origin.
pub fn app<B>(store: Arc<store::DocumentStore<B>>) -> Router
where
    B: backend::StoreBackend + 'static,
{
    census_api::api_router(store)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_LENGTH, header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use crate::{memory::InMemoryStore, store::DocumentStore};
    use tower::ServiceExt as _;

    fn test_app() -> Router {
        app(Arc::new(DocumentStore::new(InMemoryStore::new())))
    }

    #[tokio::test]
    async fn preflight_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/edit/65a1f0c2e4b0a1b2c3d4e5f6")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let resp = test_app().oneshot(request).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("PATCH"), "{methods}");
    }

    #[tokio::test]
    async fn simple_requests_carry_cors_header() {
        let request = Request::builder()
            .uri("/api/citizens")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let resp = test_app().oneshot(request).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let request = Request::builder().uri("/api/unknown").body(Body::empty()).unwrap();

        let resp = test_app().oneshot(request).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
