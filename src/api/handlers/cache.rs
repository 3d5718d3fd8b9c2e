//! Handler for flushing the trip count cache.

use axum::{Json, extract::State};
use tracing::info;

use crate::api::dto::cache::CacheClearedResponse;
use crate::state::AppState;

/// Removes every cached trip count.
///
/// # Endpoint
///
/// `DELETE /trips/v1/cache/contents`
///
/// Always returns 200; flushing an empty cache is a no-op.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<CacheClearedResponse> {
    state.cache.clear().await;
    info!("flushed cache entries");
    Json(CacheClearedResponse {
        message: "cache cleared",
    })
}
