//! HTTP request handlers for API endpoints.

pub mod cache;
pub mod health;
pub mod trips;

pub use cache::clear_cache_handler;
pub use health::health_handler;
pub use trips::{trips_by_medallions_handler, trips_on_pickup_date_handler};
