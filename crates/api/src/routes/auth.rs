//! Authentication routes: registration, password login and API key generation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blockdesk_common::error::AppError;
use blockdesk_common::types::User;
use blockdesk_engine::accounts::AccountService;

use crate::extract::ApiJson;
use crate::middleware::auth::{AuthUser, encode_jwt};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/api-keys", post(generate_api_key))
}

/// Request body for registration and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Response for successful registration or login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
}

/// Response for API key generation.
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub api_key: String,
}

fn login_response(state: &AppState, user: User) -> Result<LoginResponse, AppError> {
    let token = encode_jwt(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;

    Ok(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
    })
}

/// POST /api/auth/register — Create a user and return a JWT for it.
async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let user = AccountService::register(&state.pool, &req.username, &req.password).await?;
    Ok((StatusCode::CREATED, Json(login_response(&state, user)?)))
}

/// POST /api/auth/login — Verify username + password, return a JWT.
async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CredentialsRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = AccountService::authenticate(&state.pool, &req.username, &req.password).await?;
    Ok(Json(login_response(&state, user)?))
}

/// POST /api/auth/api-keys — Generate a new API key for the authenticated user.
async fn generate_api_key(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiKeyResponse>, AppError> {
    let api_key = AccountService::issue_api_key(&state.pool, auth.user_id).await?;
    Ok(Json(ApiKeyResponse { api_key }))
}
