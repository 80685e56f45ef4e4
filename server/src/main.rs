//! Stride platform HTTP server.
//!
//! Wires the PostgreSQL stores, the Redis session store and the Axum
//! router, then serves until interrupted.

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use stride_core::stores::postgres::{
    self, PostgresAccountStore, PostgresFollowStore, PostgresPlanStore,
    PostgresSubscriptionStore,
};
use stride_core::stores::RedisSessionStore;
use stride_core::PlatformConfig;
use stride_web::{correlation_id_layer, platform_router, AppState};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let config = PlatformConfig::from_env();

    info!(
        database = %redact_url(&config.database_url),
        "Connecting to PostgreSQL"
    );
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Some(Duration::from_secs(600)))
        .connect(&config.database_url)
        .await?;
    info!("PostgreSQL connected");

    info!("Running database migrations");
    postgres::migrate(&pool).await?;
    info!("Migrations complete");

    let sessions = RedisSessionStore::new(&config.redis_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Redis: {e}"))?;
    info!("Redis session store connected");

    let state = AppState::new(
        PostgresPlanStore::new(pool.clone()),
        PostgresSubscriptionStore::new(pool.clone()),
        PostgresFollowStore::new(pool.clone()),
        PostgresAccountStore::new(pool),
        sessions,
    );

    let app = Router::new()
        .nest("/api", platform_router(state))
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Stride server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize tracing with an env-filter (`RUST_LOG`), defaulting to info.
fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,stride=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

/// Resolve when a shutdown signal arrives.
async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received, draining connections");
}

/// Drop credentials from a connection URL before logging it.
fn redact_url(url: &str) -> &str {
    url.split('@').next_back().unwrap_or("unknown")
}
