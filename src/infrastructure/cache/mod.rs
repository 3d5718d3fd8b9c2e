//! Caching layer for trip count lookups.
//!
//! Provides a [`CacheStore`] trait with a process-local in-memory
//! implementation, [`MemoryCache`].

mod memory_cache;
mod store;

pub use memory_cache::MemoryCache;
pub use store::CacheStore;

#[cfg(test)]
pub use store::MockCacheStore;
