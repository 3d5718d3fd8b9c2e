//! PostgreSQL implementation of the trip repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::TripRepository;
use crate::domain::trip_count::TripCount;
use crate::error::AppError;

/// PostgreSQL repository for aggregate trip count queries.
///
/// Every method is a single round trip; there is no retry logic. The pool
/// lifecycle is owned by the server wiring, not by this type.
pub struct PgTripRepository {
    pool: Arc<PgPool>,
}

impl PgTripRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn count_by_medallion_on_date(
        &self,
        medallion: &str,
        pickup_date: NaiveDate,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM cab_trip_data
            WHERE medallion = $1
              AND pickup_datetime::DATE = $2
            "#,
        )
        .bind(medallion)
        .bind(pickup_date)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count_by_medallions(&self, medallions: &[String]) -> Result<Vec<TripCount>, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT medallion, COUNT(*) AS trips
            FROM cab_trip_data
            WHERE medallion = ANY($1)
            GROUP BY medallion
            "#,
        )
        .bind(medallions)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(medallion, trips)| TripCount { medallion, trips })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
