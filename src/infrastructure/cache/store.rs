//! Cache store trait.

use crate::domain::lookup_key::LookupKey;
use async_trait::async_trait;

/// Trait for caching trip counts per lookup key.
///
/// Implementations must be thread-safe under concurrent `get`/`set`/`clear`
/// from multiple callers. Absence is a typed outcome (`None`), never an
/// error; a backend failure can therefore never be misread as a miss.
///
/// Entries have no expiry. They persist until [`CacheStore::clear`] removes
/// every entry at once; there is no selective eviction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves the cached trip count for a key.
    ///
    /// Returns `None` on a miss. Must not mutate state on a miss.
    async fn get(&self, key: &LookupKey) -> Option<i64>;

    /// Stores a trip count. Idempotent upsert; a re-fetch overwrites.
    async fn set(&self, key: LookupKey, trips: i64);

    /// Removes every entry.
    async fn clear(&self);

    /// Number of entries currently cached. Used by the health endpoint.
    async fn len(&self) -> usize;
}
