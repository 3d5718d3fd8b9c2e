use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::cache_write::CacheWrite;
use crate::infrastructure::cache::CacheStore;

/// Drains queued cache writes into the cache store.
///
/// Runs as a single background task for the lifetime of the process. The
/// request path submits writes through a bounded channel and never waits on
/// them; writes still queued at process exit are dropped.
pub async fn run_cache_writer(mut rx: mpsc::Receiver<CacheWrite>, cache: Arc<dyn CacheStore>) {
    while let Some(write) = rx.recv().await {
        debug!(key = %write.key, trips = write.trips, "applying cache write");
        cache.set(write.key, write.trips).await;
    }
    debug!("cache write channel closed, writer exiting");
}
