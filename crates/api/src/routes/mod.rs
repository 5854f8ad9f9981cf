pub mod addresses;
pub mod auth;
pub mod balance;
pub mod health;
pub mod orders;
pub mod search;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(search::router())
        .merge(addresses::router())
        .merge(balance::router())
        .merge(orders::router())
        .with_state(state)
}
