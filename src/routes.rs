//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /health`                                - component health checks (public)
//! - `GET    /trips/v1/medallion/{id}/pickupdate/{date}` - single lookup
//! - `GET    /trips/v1/medallions/{ids}`             - batch lookup
//! - `DELETE /trips/v1/cache/contents`               - flush the cache
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/trips/v1", api::routes::trip_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
