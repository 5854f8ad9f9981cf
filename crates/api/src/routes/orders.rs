//! Order routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use blockdesk_common::error::AppError;
use blockdesk_common::types::Order;
use blockdesk_engine::orders::{CreateOrderParams, OrderService};

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/{id}/complete", post(complete_order))
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteOrderRequest {
    pub completed: bool,
}

/// GET /api/orders — The user's orders, newest first, optionally `?completed=`.
async fn list_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderService::list(&state.pool, auth.user_id, query.completed).await?;
    Ok(Json(orders))
}

/// POST /api/orders — Create a pending order on an available deposit address.
async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(params): ApiJson<CreateOrderParams>,
) -> Result<Json<Order>, AppError> {
    let order = OrderService::create(&state.pool, auth.user_id, &params).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/complete — Set the order's completed flag.
async fn complete_order(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<CompleteOrderRequest>,
) -> Result<Json<Order>, AppError> {
    let order = OrderService::complete(&state.pool, auth.user_id, id, req.completed).await?;
    Ok(Json(order))
}
