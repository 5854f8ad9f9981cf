//! Ledger search routes and search history.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use blockdesk_common::error::AppError;
use blockdesk_common::types::{SearchKind, SearchRecord};
use blockdesk_engine::search::SearchService;
use blockdesk_engine::validation::{validate_address, validate_transaction};

use crate::extract::{ApiPath, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/search/address/{address}", get(search_address))
        .route("/api/search/transaction/{hash}", get(search_transaction))
        .route("/api/searches", get(past_searches))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub kind: Option<SearchKind>,
}

/// GET /api/search/address/:address — Look up an address on the ledger.
async fn search_address(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(address): ApiPath<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Malformed input is rejected without using up the search slot
    validate_address(&address)?;
    let mut redis = state.redis.clone();
    state.throttle.acquire(&mut redis, auth.user_id).await?;

    let payload =
        SearchService::search_address(&state.pool, state.ledger.as_ref(), auth.user_id, &address)
            .await?;
    Ok(Json(payload))
}

/// GET /api/search/transaction/:hash — Look up a transaction on the ledger.
async fn search_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(hash): ApiPath<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_transaction(&hash)?;
    let mut redis = state.redis.clone();
    state.throttle.acquire(&mut redis, auth.user_id).await?;

    let payload =
        SearchService::search_transaction(&state.pool, state.ledger.as_ref(), auth.user_id, &hash)
            .await?;
    Ok(Json(payload))
}

/// GET /api/searches — The user's past searches, optionally `?kind=address|transaction`.
async fn past_searches(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<Vec<SearchRecord>>, AppError> {
    let records = SearchService::history(&state.pool, auth.user_id, query.kind).await?;
    Ok(Json(records))
}
