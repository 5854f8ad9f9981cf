//! Owned-address routes: mark an address as mine, list, unmark.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use blockdesk_common::error::AppError;
use blockdesk_common::types::OwnedAddress;
use blockdesk_engine::allocator::OrderAllocator;
use blockdesk_engine::inventory::AddressInventory;
use blockdesk_engine::validation::normalize_currency;

use crate::extract::{ApiJson, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/addresses",
            get(list_addresses).post(claim_address).delete(unclaim_address),
        )
        .route("/api/addresses/available", get(available_addresses))
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub address: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct UnclaimRequest {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailableQuery {
    pub currency: String,
}

/// GET /api/addresses — Addresses the user has marked as theirs.
async fn list_addresses(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<OwnedAddress>>, AppError> {
    let addresses = AddressInventory::list(&state.pool, auth.user_id).await?;
    Ok(Json(addresses))
}

/// POST /api/addresses — Mark a previously searched address as mine.
async fn claim_address(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<ClaimRequest>,
) -> Result<Json<OwnedAddress>, AppError> {
    let owned =
        AddressInventory::claim(&state.pool, auth.user_id, &req.address, &req.currency).await?;
    Ok(Json(owned))
}

/// DELETE /api/addresses — Unmark an address.
async fn unclaim_address(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UnclaimRequest>,
) -> Result<StatusCode, AppError> {
    AddressInventory::unclaim(&state.pool, auth.user_id, &req.address).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/addresses/available?currency=BTC — Addresses free to receive a new order.
async fn available_addresses(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<AvailableQuery>,
) -> Result<Json<Vec<OwnedAddress>>, AppError> {
    let currency = normalize_currency(&query.currency)?;
    let addresses = OrderAllocator::available(&state.pool, auth.user_id, &currency).await?;
    Ok(Json(addresses))
}
