//! Shared application state for the Axum API server.

use std::sync::Arc;

use blockdesk_common::config::AppConfig;
use blockdesk_engine::throttle::SearchThrottle;
use blockdesk_ledger::LedgerClient;
use redis::aio::ConnectionManager;
use sqlx::PgPool;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub redis: ConnectionManager,
    pub ledger: Arc<dyn LedgerClient>,
    pub throttle: SearchThrottle,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        redis: ConnectionManager,
        ledger: Arc<dyn LedgerClient>,
        config: AppConfig,
    ) -> Self {
        Self {
            pool,
            redis,
            ledger,
            throttle: SearchThrottle::new(config.search_throttle_seconds),
            config,
        }
    }
}
