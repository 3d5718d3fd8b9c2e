//! Trip API route configuration.

use crate::api::handlers::{
    clear_cache_handler, trips_by_medallions_handler, trips_on_pickup_date_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Routes nested under `/trips/v1`.
///
/// # Endpoints
///
/// - `GET    /medallion/{medallion}/pickupdate/{pickupdate}` - single lookup
/// - `GET    /medallions/{ids}`                              - batch lookup (comma-separated)
/// - `DELETE /cache/contents`                                - flush the cache
pub fn trip_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/medallion/{medallion}/pickupdate/{pickupdate}",
            get(trips_on_pickup_date_handler),
        )
        .route("/medallions/{medallions}", get(trips_by_medallions_handler))
        .route("/cache/contents", delete(clear_cache_handler))
}
