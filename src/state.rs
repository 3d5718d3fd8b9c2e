use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::TripService;
use crate::domain::cache_write::CacheWrite;
use crate::domain::repositories::TripRepository;
use crate::infrastructure::cache::CacheStore;

/// Shared application state injected into every handler.
///
/// All components are explicitly constructed in `server::run` (or in test
/// setup) and passed by reference; there is no ambient singleton.
#[derive(Clone)]
pub struct AppState {
    pub trip_service: Arc<TripService>,
    pub repository: Arc<dyn TripRepository>,
    pub cache: Arc<dyn CacheStore>,
    pub cache_write_tx: mpsc::Sender<CacheWrite>,
    /// Upper bound on medallions accepted by the batch endpoint.
    pub max_batch_medallions: usize,
}
