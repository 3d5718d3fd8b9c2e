//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; the concrete
//! implementation lives in `crate::infrastructure::persistence`. Mock
//! implementations are auto-generated via `mockall` for testing.

pub mod trip_repository;

pub use trip_repository::TripRepository;

#[cfg(test)]
pub use trip_repository::MockTripRepository;
