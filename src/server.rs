//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, prepares it (migrations and seed data for
//! PostgreSQL) and runs the Axum server until shutdown.

use crate::config::{Config, StorageBackend};
use crate::domain::storage::Storage;
use crate::infrastructure::persistence::{MemoryStorage, PgStorage};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (in-memory, or PostgreSQL with migrations and seeding)
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = build_storage(&config).await?;
    let state = AppState::new(storage);

    let app = app_router(
        state,
        config.rate_limit(),
        config.static_dir.as_deref().map(Path::new),
    );

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the storage backend named by the configuration.
///
/// # Errors
///
/// Returns an error if the PostgreSQL backend cannot connect or migrate.
/// A failed seed is logged and tolerated.
pub async fn build_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage (data is lost on restart)");
            if config.seed_on_startup {
                Ok(Arc::new(MemoryStorage::seeded().await?))
            } else {
                Ok(Arc::new(MemoryStorage::empty()))
            }
        }
        StorageBackend::Postgres => {
            let pool = connect(config).await?;
            migrate(&pool).await?;

            let storage = PgStorage::new(Arc::new(pool));
            if config.seed_on_startup {
                match storage.seed_if_empty().await {
                    Ok(true) => tracing::info!("Seeded empty database"),
                    Ok(false) => {}
                    Err(e) => tracing::error!("Error initializing sample data: {}", e),
                }
            }

            Ok(Arc::new(storage))
        }
    }
}

/// Opens the PostgreSQL pool, retrying with jittered exponential backoff.
///
/// # Errors
///
/// Returns the last connection error once `db_connect_retries` attempts fail.
pub async fn connect(config: &Config) -> Result<PgPool> {
    let url = config
        .database_url
        .clone()
        .context("DATABASE_URL is required for the postgres backend")?;

    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    // 500ms, 1s, 2s, ... capped at 10s; the first attempt is immediate.
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(250)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(config.db_connect_retries.saturating_sub(1));

    let pool = Retry::start(strategy, || {
        let options = options.clone();
        let url = url.clone();
        async move {
            options.connect(&url).await.inspect_err(|e| {
                tracing::warn!("Database connection attempt failed: {}", e);
            })
        }
    })
    .await
    .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Applies the embedded schema migrations.
///
/// # Errors
///
/// Returns an error if any migration fails.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to migrate")?;

    tracing::info!("Migrations applied");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
