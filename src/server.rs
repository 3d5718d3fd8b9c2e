//! HTTP server initialization and runtime setup.
//!
//! Handles the database connection, cache construction, cache writer
//! spawning, and the Axum server lifecycle.

use crate::application::services::TripService;
use crate::config::Config;
use crate::domain::cache_writer::run_cache_writer;
use crate::domain::repositories::TripRepository;
use crate::infrastructure::cache::{CacheStore, MemoryCache};
use crate::infrastructure::persistence::PgTripRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (applies migrations)
/// - In-memory trip count cache
/// - Background cache writer
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migration, server bind, or
/// server runtime fails. A database connection failure here is fatal: the
/// process exits before serving any request.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let repository: Arc<dyn TripRepository> = Arc::new(PgTripRepository::new(pool));
    let cache: Arc<dyn CacheStore> = Arc::new(MemoryCache::new());

    let (cache_write_tx, cache_write_rx) = mpsc::channel(config.cache_write_queue_capacity);
    tokio::spawn(run_cache_writer(cache_write_rx, cache.clone()));
    tracing::info!("Cache writer started");

    let trip_service = Arc::new(TripService::new(
        repository.clone(),
        cache.clone(),
        cache_write_tx.clone(),
    ));

    let state = AppState {
        trip_service,
        repository,
        cache,
        cache_write_tx,
        max_batch_medallions: config.max_batch_medallions,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
