//! Data Transfer Objects for API requests and responses.

pub mod cache;
pub mod health;
pub mod trips;
