//! Trip count lookup orchestration.
//!
//! Implements the cache-aside read policy shared by both lookup modes:
//! probe the cache unless bypassed, fall back to the trip store on a miss,
//! and schedule an asynchronous cache write for everything fetched from the
//! store.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::domain::cache_write::CacheWrite;
use crate::domain::lookup_key::LookupKey;
use crate::domain::repositories::TripRepository;
use crate::domain::trip_count::TripCount;
use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;

/// Orchestrates trip count lookups across the cache and the trip store.
///
/// Cache repopulation is dispatched through a bounded channel drained by
/// [`crate::domain::cache_writer::run_cache_writer`]; the response path
/// never waits on a cache write. When the channel is full the write is shed
/// with a warning, which bounds in-flight write volume under load.
///
/// Concurrent lookups for the same key are not deduplicated: both may fetch
/// from the store and both schedule overwriting writes. `set` is an
/// idempotent overwrite, so per-key last-write-wins.
pub struct TripService {
    repository: Arc<dyn TripRepository>,
    cache: Arc<dyn CacheStore>,
    write_tx: mpsc::Sender<CacheWrite>,
}

impl TripService {
    /// Creates a new lookup service.
    pub fn new(
        repository: Arc<dyn TripRepository>,
        cache: Arc<dyn CacheStore>,
        write_tx: mpsc::Sender<CacheWrite>,
    ) -> Self {
        Self {
            repository,
            cache,
            write_tx,
        }
    }

    /// Looks up the trip count for one medallion on one pickup date.
    ///
    /// With `bypass_cache` the cache is not probed and the store is always
    /// queried. Otherwise a cache hit is returned immediately and only a
    /// miss falls through to the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Lookup`] if the store query fails; no cache write
    /// is scheduled in that case.
    pub async fn trips_on_pickup_date(
        &self,
        medallion: &str,
        pickup_date: NaiveDate,
        bypass_cache: bool,
    ) -> Result<TripCount, AppError> {
        let key = LookupKey::for_pickup_date(medallion, pickup_date);

        if !bypass_cache {
            if let Some(trips) = self.cache.get(&key).await {
                return Ok(TripCount::new(medallion, trips));
            }
        }

        let trips = self
            .repository
            .count_by_medallion_on_date(medallion, pickup_date)
            .await?;
        self.schedule_cache_write(key, trips);

        Ok(TripCount::new(medallion, trips))
    }

    /// Looks up total trip counts for a batch of medallions.
    ///
    /// Unless bypassed, medallions are partitioned into cache hits and
    /// misses in discovery order; the misses go to the store in exactly one
    /// grouped query. The result is hits followed by store rows - NOT the
    /// caller's input order. Medallions with zero trips are absent from the
    /// result, mirroring the grouped query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Lookup`] if the grouped query fails. The whole
    /// batch fails; cache hits already collected are discarded from the
    /// response.
    pub async fn trips_by_medallions(
        &self,
        medallions: &[String],
        bypass_cache: bool,
    ) -> Result<Vec<TripCount>, AppError> {
        if bypass_cache {
            let results = self.repository.count_by_medallions(medallions).await?;
            for result in &results {
                self.schedule_cache_write(
                    LookupKey::for_medallion(result.medallion.as_str()),
                    result.trips,
                );
            }
            return Ok(results);
        }

        let mut results = Vec::with_capacity(medallions.len());
        let mut misses = Vec::new();
        for medallion in medallions {
            let key = LookupKey::for_medallion(medallion.as_str());
            match self.cache.get(&key).await {
                Some(trips) => results.push(TripCount::new(medallion.as_str(), trips)),
                None => misses.push(medallion.clone()),
            }
        }

        if !misses.is_empty() {
            debug!(hits = results.len(), misses = misses.len(), "batch lookup partitioned");
            let fetched = self.repository.count_by_medallions(&misses).await?;
            for result in &fetched {
                self.schedule_cache_write(
                    LookupKey::for_medallion(result.medallion.as_str()),
                    result.trips,
                );
            }
            results.extend(fetched);
        }

        Ok(results)
    }

    /// Submits a cache write without waiting on it.
    ///
    /// A full queue sheds the write; the cache simply stays cold for that
    /// key until a later lookup repopulates it.
    fn schedule_cache_write(&self, key: LookupKey, trips: i64) {
        match self.write_tx.try_send(CacheWrite { key, trips }) {
            Ok(()) => {}
            Err(TrySendError::Full(write)) => {
                warn!(key = %write.key, "cache write queue full, dropping write");
            }
            Err(TrySendError::Closed(write)) => {
                warn!(key = %write.key, "cache writer stopped, dropping write");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTripRepository;
    use crate::infrastructure::cache::{MemoryCache, MockCacheStore};
    use serde_json::json;
    use tokio::sync::mpsc::error::TryRecvError;

    fn pickup_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 12, 31).unwrap()
    }

    fn service_with(
        repository: MockTripRepository,
        cache: impl CacheStore + 'static,
    ) -> (TripService, mpsc::Receiver<CacheWrite>) {
        let (tx, rx) = mpsc::channel(16);
        let service = TripService::new(Arc::new(repository), Arc::new(cache), tx);
        (service, rx)
    }

    #[tokio::test]
    async fn cache_hit_short_circuits_the_store() {
        // No expectations on the repository: any call panics the test.
        let repository = MockTripRepository::new();
        let cache = MemoryCache::new();
        cache
            .set(LookupKey::for_pickup_date("med2", pickup_date()), 10)
            .await;

        let (service, mut rx) = service_with(repository, cache);
        let result = service
            .trips_on_pickup_date("med2", pickup_date(), false)
            .await
            .unwrap();

        assert_eq!(result, TripCount::new("med2", 10));
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn cache_miss_falls_back_and_schedules_write() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallion_on_date()
            .withf(|medallion, date| medallion == "med1" && *date == pickup_date())
            .times(1)
            .returning(|_, _| Ok(5));

        let (service, mut rx) = service_with(repository, MemoryCache::new());
        let result = service
            .trips_on_pickup_date("med1", pickup_date(), false)
            .await
            .unwrap();

        assert_eq!(result, TripCount::new("med1", 5));
        let write = rx.try_recv().unwrap();
        assert_eq!(write.key, LookupKey::for_pickup_date("med1", pickup_date()));
        assert_eq!(write.trips, 5);
    }

    #[tokio::test]
    async fn bypass_never_probes_the_cache() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallion_on_date()
            .times(1)
            .returning(|_, _| Ok(5));

        // Cache mock with no expectations: a probe would panic.
        let cache = MockCacheStore::new();

        let (service, mut rx) = service_with(repository, cache);
        let result = service
            .trips_on_pickup_date("med1", pickup_date(), true)
            .await
            .unwrap();

        assert_eq!(result, TripCount::new("med1", 5));
        assert_eq!(rx.try_recv().unwrap().trips, 5);
    }

    #[tokio::test]
    async fn store_failure_surfaces_and_schedules_nothing() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallion_on_date()
            .times(1)
            .returning(|_, _| Err(AppError::lookup("Trip store query failed", json!({}))));

        let (service, mut rx) = service_with(repository, MemoryCache::new());
        let result = service
            .trips_on_pickup_date("med3", pickup_date(), false)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Lookup { .. }));
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn warmed_cache_skips_the_store_on_second_lookup() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallion_on_date()
            .times(1)
            .returning(|_, _| Ok(5));

        let cache = Arc::new(MemoryCache::new());
        let (tx, mut rx) = mpsc::channel(16);
        let service = TripService::new(Arc::new(repository), cache.clone(), tx);

        let first = service
            .trips_on_pickup_date("med1", pickup_date(), false)
            .await
            .unwrap();
        assert_eq!(first.trips, 5);

        // Apply the queued write the way the background writer would.
        let write = rx.recv().await.unwrap();
        cache.set(write.key, write.trips).await;

        let second = service
            .trips_on_pickup_date("med1", pickup_date(), false)
            .await
            .unwrap();
        assert_eq!(second.trips, 5);
    }

    #[tokio::test]
    async fn batch_returns_hits_then_store_rows() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallions()
            .withf(|medallions: &[String]| medallions == ["b".to_string()])
            .times(1)
            .returning(|_| Ok(vec![TripCount::new("b", 7)]));

        let cache = MemoryCache::new();
        cache.set(LookupKey::for_medallion("a"), 3).await;

        let (service, mut rx) = service_with(repository, cache);
        let medallions = vec!["a".to_string(), "b".to_string()];
        let results = service.trips_by_medallions(&medallions, false).await.unwrap();

        assert_eq!(
            results,
            vec![TripCount::new("a", 3), TripCount::new("b", 7)]
        );
        let write = rx.try_recv().unwrap();
        assert_eq!(write.key, LookupKey::for_medallion("b"));
        assert_eq!(write.trips, 7);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn batch_with_all_hits_skips_the_store() {
        let repository = MockTripRepository::new();
        let cache = MemoryCache::new();
        cache.set(LookupKey::for_medallion("a"), 3).await;
        cache.set(LookupKey::for_medallion("b"), 4).await;

        let (service, mut rx) = service_with(repository, cache);
        let medallions = vec!["a".to_string(), "b".to_string()];
        let results = service.trips_by_medallions(&medallions, false).await.unwrap();

        assert_eq!(
            results,
            vec![TripCount::new("a", 3), TripCount::new("b", 4)]
        );
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn batch_bypass_queries_all_and_schedules_every_write() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallions()
            .withf(|medallions: &[String]| {
                medallions == ["a".to_string(), "b".to_string()]
            })
            .times(1)
            .returning(|_| Ok(vec![TripCount::new("a", 3), TripCount::new("b", 7)]));

        let (service, mut rx) = service_with(repository, MockCacheStore::new());
        let medallions = vec!["a".to_string(), "b".to_string()];
        let results = service.trips_by_medallions(&medallions, true).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(rx.try_recv().unwrap().key, LookupKey::for_medallion("a"));
        assert_eq!(rx.try_recv().unwrap().key, LookupKey::for_medallion("b"));
    }

    #[tokio::test]
    async fn batch_store_failure_discards_partial_hits() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallions()
            .times(1)
            .returning(|_| Err(AppError::lookup("Trip store query failed", json!({}))));

        let cache = MemoryCache::new();
        cache.set(LookupKey::for_medallion("a"), 3).await;

        let (service, mut rx) = service_with(repository, cache);
        let medallions = vec!["a".to_string(), "b".to_string()];
        let result = service.trips_by_medallions(&medallions, false).await;

        assert!(matches!(result.unwrap_err(), AppError::Lookup { .. }));
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn batch_omits_medallions_with_zero_trips() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallions()
            .times(1)
            .returning(|_| Ok(vec![TripCount::new("a", 3)]));

        let (service, _rx) = service_with(repository, MemoryCache::new());
        let medallions = vec!["a".to_string(), "no-trips".to_string()];
        let results = service.trips_by_medallions(&medallions, false).await.unwrap();

        assert_eq!(results, vec![TripCount::new("a", 3)]);
    }

    #[tokio::test]
    async fn full_write_queue_sheds_without_failing_the_lookup() {
        let mut repository = MockTripRepository::new();
        repository
            .expect_count_by_medallion_on_date()
            .times(1)
            .returning(|_, _| Ok(5));

        let (tx, mut rx) = mpsc::channel(1);
        tx.try_send(CacheWrite {
            key: LookupKey::for_medallion("filler"),
            trips: 0,
        })
        .unwrap();

        let service = TripService::new(
            Arc::new(repository),
            Arc::new(MemoryCache::new()),
            tx,
        );
        let result = service
            .trips_on_pickup_date("med1", pickup_date(), true)
            .await
            .unwrap();

        assert_eq!(result.trips, 5);
        // Only the filler made it into the queue.
        assert_eq!(rx.try_recv().unwrap().key, LookupKey::for_medallion("filler"));
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }
}
