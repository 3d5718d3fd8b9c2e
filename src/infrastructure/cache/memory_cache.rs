//! Process-local in-memory cache implementation.

use super::store::CacheStore;
use crate::domain::lookup_key::LookupKey;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// In-memory trip count cache keyed on [`LookupKey`].
///
/// Keying the map on the structured key removes any string-collision risk
/// between the two key shapes. The store is process-local: contents are not
/// persisted and not shared across nodes.
///
/// Mutations are serialized by an internal `RwLock`; callers take no
/// external locks.
pub struct MemoryCache {
    entries: RwLock<HashMap<LookupKey, i64>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &LookupKey) -> Option<i64> {
        let trips = self.entries.read().get(key).copied();
        match trips {
            Some(trips) => debug!(key = %key, trips, "cache HIT"),
            None => debug!(key = %key, "cache MISS"),
        }
        trips
    }

    async fn set(&self, key: LookupKey, trips: i64) {
        debug!(key = %key, trips, "cache SET");
        self.entries.write().insert(key, trips);
    }

    async fn clear(&self) {
        let mut entries = self.entries.write();
        debug!(count = entries.len(), "cache CLEAR");
        entries.clear();
    }

    async fn len(&self) -> usize {
        self.entries.read().len()
    }
}
