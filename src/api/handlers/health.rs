//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: `SELECT 1` against the trip store
/// 2. **Cache writer**: Checks the write channel is open and reports capacity
/// 3. **Cache**: Reports the number of cached entries
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let writer_check = check_cache_writer(&state);
    let cache_check = check_cache(&state).await;

    let all_healthy =
        db_check.status == "ok" && writer_check.status == "ok" && cache_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            cache_writer: writer_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks trip store connectivity.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.repository.ping().await {
        Ok(()) => CheckStatus {
            status: "ok".to_string(),
            message: Some("Connected".to_string()),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Database error: {}", e)),
        },
    }
}

/// Checks if the background cache writer is still accepting writes.
fn check_cache_writer(state: &AppState) -> CheckStatus {
    if state.cache_write_tx.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Cache write queue is closed".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Capacity: {}", state.cache_write_tx.capacity())),
        }
    }
}

/// Reports the in-memory cache size; the cache itself cannot fail.
async fn check_cache(state: &AppState) -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("Entries: {}", state.cache.len().await)),
    }
}
