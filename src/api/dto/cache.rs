//! DTO for the cache flush endpoint.

use serde::Serialize;

/// Acknowledgement returned after flushing the cache.
#[derive(Debug, Serialize)]
pub struct CacheClearedResponse {
    pub message: &'static str,
}
