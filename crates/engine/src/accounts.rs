//! Account service: registration, password login and API keys.

use sqlx::PgPool;
use uuid::Uuid;

use blockdesk_common::error::{AppError, is_unique_violation};
use blockdesk_common::types::User;

use crate::password::{hash_password, verify_password};
use crate::validation::validate_credentials;

/// Service layer for user accounts.
pub struct AccountService;

impl AccountService {
    /// Register a new user with a username and password.
    pub async fn register(pool: &PgPool, username: &str, password: &str) -> Result<User, AppError> {
        validate_credentials(username, password)?;

        let user: User = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(hash_password(password)?)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!("Username '{}' is already taken", username))
            } else {
                AppError::Database(e)
            }
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Verify a username/password pair.
    pub async fn authenticate(
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        match user {
            Some(user) if verify_password(password, &user.password_hash) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(user)
            }
            _ => {
                tracing::debug!(username, "Rejected login");
                Err(AppError::Auth("Invalid username or password".to_string()))
            }
        }
    }

    /// Generate and store a new API key, replacing any previous one.
    pub async fn issue_api_key(pool: &PgPool, user_id: Uuid) -> Result<String, AppError> {
        let api_key = format!("bd_{}", Uuid::new_v4().simple());

        let result = sqlx::query("UPDATE users SET api_key = $1, updated_at = NOW() WHERE id = $2")
            .bind(&api_key)
            .bind(user_id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        tracing::info!(user_id = %user_id, "API key generated");

        Ok(api_key)
    }

    /// Resolve an API key to its owner.
    pub async fn find_by_api_key(pool: &PgPool, api_key: &str) -> Result<Option<Uuid>, AppError> {
        let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE api_key = $1")
            .bind(api_key)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|(id,)| id))
    }
}
