//! PostgreSQL-backed repository implementations.

mod pg_trip_repository;

pub use pg_trip_repository::PgTripRepository;
