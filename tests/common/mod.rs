#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use tokio::sync::mpsc;

use cab_trips::application::services::TripService;
use cab_trips::domain::cache_write::CacheWrite;
use cab_trips::domain::cache_writer::run_cache_writer;
use cab_trips::domain::repositories::TripRepository;
use cab_trips::domain::trip_count::TripCount;
use cab_trips::error::AppError;
use cab_trips::infrastructure::cache::{CacheStore, MemoryCache};
use cab_trips::state::AppState;

/// Deterministic in-memory stand-in for the Postgres repository.
#[derive(Default)]
pub struct StubTripRepository {
    dated_counts: HashMap<(String, NaiveDate), i64>,
    total_counts: HashMap<String, i64>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl StubTripRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_dated_count(mut self, medallion: &str, pickup_date: NaiveDate, trips: i64) -> Self {
        self.dated_counts
            .insert((medallion.to_string(), pickup_date), trips);
        self
    }

    pub fn with_total_count(mut self, medallion: &str, trips: i64) -> Self {
        self.total_counts.insert(medallion.to_string(), trips);
        self
    }

    fn check_fail(&self) -> Result<(), AppError> {
        if self.fail {
            Err(AppError::lookup("Trip store query failed", json!({})))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TripRepository for StubTripRepository {
    async fn count_by_medallion_on_date(
        &self,
        medallion: &str,
        pickup_date: NaiveDate,
    ) -> Result<i64, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self
            .dated_counts
            .get(&(medallion.to_string(), pickup_date))
            .copied()
            .unwrap_or(0))
    }

    async fn count_by_medallions(&self, medallions: &[String]) -> Result<Vec<TripCount>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        // Rows sorted by medallion for deterministic assertions; medallions
        // with no recorded trips are absent, like the grouped SQL query.
        let mut rows: Vec<TripCount> = medallions
            .iter()
            .filter_map(|m| {
                self.total_counts
                    .get(m)
                    .map(|trips| TripCount::new(m.clone(), *trips))
            })
            .collect();
        rows.sort_by(|a, b| a.medallion.cmp(&b.medallion));
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_fail()
    }
}

/// Builds an [`AppState`] over the stub repository and a real in-memory
/// cache, with the background cache writer running.
///
/// Callers keep their own clone of the `Arc` to inspect the stub's call
/// counter after driving requests.
pub fn create_test_state(repository: Arc<StubTripRepository>) -> AppState {
    let repository: Arc<dyn TripRepository> = repository;
    let cache: Arc<dyn CacheStore> = Arc::new(MemoryCache::new());

    let (tx, rx) = mpsc::channel::<CacheWrite>(100);
    tokio::spawn(run_cache_writer(rx, cache.clone()));

    let trip_service = Arc::new(TripService::new(
        repository.clone(),
        cache.clone(),
        tx.clone(),
    ));

    AppState {
        trip_service,
        repository,
        cache,
        cache_write_tx: tx,
        max_batch_medallions: 100,
    }
}
