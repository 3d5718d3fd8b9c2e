//! Core business entities and repository traits.
//!
//! The domain layer has no knowledge of HTTP or PostgreSQL. It defines the
//! trip count entity, the structured cache key, the repository contract the
//! orchestrator consumes, and the background cache writer fed by the
//! application layer.

pub mod cache_write;
pub mod cache_writer;
pub mod lookup_key;
pub mod repositories;
pub mod trip_count;

pub use cache_write::CacheWrite;
pub use lookup_key::LookupKey;
pub use trip_count::TripCount;
