//! Application services.

pub mod trip_service;

pub use trip_service::TripService;
