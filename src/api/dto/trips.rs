//! DTOs for trip count lookups.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::trip_count::TripCount;
use crate::error::AppError;

/// Trip count for one medallion, as returned to API clients.
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub medallion: String,
    pub trips: i64,
}

impl From<TripCount> for TripResponse {
    fn from(count: TripCount) -> Self {
        Self {
            medallion: count.medallion,
            trips: count.trips,
        }
    }
}

/// Query parameters shared by the lookup endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CacheParams {
    pub bypasscache: Option<String>,
}

impl CacheParams {
    /// Parses the `bypasscache` flag. Absent or empty means `false`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for anything other than
    /// `true`/`false`/`1`/`0` (case-insensitive).
    pub fn bypass_cache(&self) -> Result<bool, AppError> {
        match self.bypasscache.as_deref() {
            None | Some("") => Ok(false),
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
            Some(v) => Err(AppError::bad_request(
                "invalid bypasscache",
                json!({ "bypasscache": v }),
            )),
        }
    }
}
