//! Aggregate balance route.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use blockdesk_common::error::AppError;
use blockdesk_engine::balance::{BalanceService, BalanceSummary};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/balance", get(balance))
}

/// GET /api/balance — Sum of final balances over all owned addresses.
async fn balance(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BalanceSummary>, AppError> {
    let summary = BalanceService::total(&state.pool, state.ledger.as_ref(), auth.user_id).await?;
    Ok(Json(summary))
}
