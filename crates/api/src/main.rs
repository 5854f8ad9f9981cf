//! BlockDesk API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use blockdesk_common::config::AppConfig;
use blockdesk_common::db::{create_pool, run_migrations};
use blockdesk_common::error::AppError;
use blockdesk_common::redis_pool::create_redis_pool;
use blockdesk_ledger::BlockchainInfoClient;

use blockdesk_api::routes::create_router;
use blockdesk_api::state::AppState;

/// Request bodies are tiny JSON documents.
const MAX_BODY_BYTES: usize = 16 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("blockdesk_api=debug,blockdesk_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting BlockDesk API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Create database connection pool and bring the schema up to date
    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    run_migrations(&pool).await?;

    // Create Redis connection (search throttle)
    let redis = create_redis_pool(&config.redis_url).await?;

    // External ledger client
    let ledger = BlockchainInfoClient::new(
        config.ledger_api_url.clone(),
        Duration::from_secs(config.ledger_timeout_secs),
    )
    .map_err(|e| AppError::Config(format!("Failed to build ledger client: {}", e)))?;
    tracing::info!(
        url = %ledger.base_url(),
        timeout_secs = config.ledger_timeout_secs,
        "Ledger client ready"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));

    // Build application state
    let state = AppState::new(pool, redis, Arc::new(ledger), config);

    // Build router
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    tracing::info!("BlockDesk API server stopped.");
    Ok(())
}
