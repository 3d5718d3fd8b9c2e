//! Handlers for trip count lookups.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde_json::json;

use crate::api::dto::trips::{CacheParams, TripResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Trip count for one medallion on one pickup date.
///
/// # Endpoint
///
/// `GET /trips/v1/medallion/{medallion}/pickupdate/{pickupdate}?bypasscache={bool}`
///
/// # Errors
///
/// Returns 400 if the date is not `YYYY-MM-DD` or the flag is malformed,
/// and 500 if the trip store query fails.
pub async fn trips_on_pickup_date_handler(
    State(state): State<AppState>,
    Path((medallion, pickupdate)): Path<(String, String)>,
    Query(params): Query<CacheParams>,
) -> Result<Json<TripResponse>, AppError> {
    let pickup_date = parse_pickup_date(&pickupdate)?;
    let bypass_cache = params.bypass_cache()?;

    let result = state
        .trip_service
        .trips_on_pickup_date(&medallion, pickup_date, bypass_cache)
        .await?;

    Ok(Json(result.into()))
}

/// Total trip counts for a comma-separated batch of medallions.
///
/// # Endpoint
///
/// `GET /trips/v1/medallions/{id1,id2,...}?bypasscache={bool}`
///
/// Result order is cache hits first, then store rows; it is not guaranteed
/// to match the order of the ids in the path. Medallions with zero recorded
/// trips are omitted.
///
/// # Errors
///
/// Returns 400 when no medallion is given, when the batch exceeds the
/// configured maximum, or when the flag is malformed; 500 if the trip store
/// query fails.
pub async fn trips_by_medallions_handler(
    State(state): State<AppState>,
    Path(medallions): Path<String>,
    Query(params): Query<CacheParams>,
) -> Result<Json<Vec<TripResponse>>, AppError> {
    let medallions: Vec<String> = medallions
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect();

    if medallions.is_empty() {
        return Err(AppError::bad_request("missing medallions", json!({})));
    }
    if medallions.len() > state.max_batch_medallions {
        return Err(AppError::bad_request(
            "too many medallions",
            json!({ "max": state.max_batch_medallions, "got": medallions.len() }),
        ));
    }

    let bypass_cache = params.bypass_cache()?;

    let results = state
        .trip_service
        .trips_by_medallions(&medallions, bypass_cache)
        .await?;

    Ok(Json(results.into_iter().map(Into::into).collect()))
}

fn parse_pickup_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request("invalid pick up date", json!({ "pickupdate": value }))
    })
}
