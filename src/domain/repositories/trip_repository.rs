//! Repository trait for aggregate trip count queries.

use crate::domain::trip_count::TripCount;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Repository interface for counting cab trips in the backing store.
///
/// All queries are single-round-trip aggregates; none of them retries on
/// failure. The orchestrator treats every error as a failed lookup.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTripRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Counts trips for one medallion on one calendar date.
    ///
    /// The date comparison is truncated to day granularity, not exact
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Lookup`] on any connectivity or SQL failure.
    async fn count_by_medallion_on_date(
        &self,
        medallion: &str,
        pickup_date: NaiveDate,
    ) -> Result<i64, AppError>;

    /// Counts trips for each of the given medallions in a single grouped
    /// query.
    ///
    /// Medallions with no matching trips are absent from the result; the
    /// caller must not assume one row per input medallion.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Lookup`] on any connectivity or SQL failure.
    async fn count_by_medallions(&self, medallions: &[String]) -> Result<Vec<TripCount>, AppError>;

    /// Probes store connectivity. Used by the health check endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Lookup`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
