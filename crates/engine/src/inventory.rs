//! Address inventory, the addresses a user has claimed as their own.
//!
//! A claim is only accepted for an address the user has searched, and only
//! while the most recent of those searches succeeded. Claimed addresses are
//! the pool the order allocator draws deposit addresses from.

use sqlx::PgPool;
use uuid::Uuid;

use blockdesk_common::error::{AppError, is_foreign_key_violation, is_unique_violation};
use blockdesk_common::types::OwnedAddress;

use crate::search::SearchService;
use crate::validation::{normalize_currency, validate_address};

/// Service layer for owned addresses.
pub struct AddressInventory;

impl AddressInventory {
    /// Claim a previously searched, valid address for `user_id`.
    pub async fn claim(
        pool: &PgPool,
        user_id: Uuid,
        address: &str,
        currency: &str,
    ) -> Result<OwnedAddress, AppError> {
        validate_address(address)?;
        let currency = normalize_currency(currency)?;

        match SearchService::latest_validity(pool, user_id, address).await? {
            None => return Err(AppError::NotSearched),
            Some(false) => return Err(AppError::InvalidAddress),
            Some(true) => {}
        }

        if Self::find(pool, user_id, address).await?.is_some() {
            return Err(AppError::AlreadyClaimed);
        }

        let owned: OwnedAddress = sqlx::query_as(
            r#"
            INSERT INTO owned_addresses (user_id, address, currency)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(address)
        .bind(&currency)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyClaimed
            } else {
                AppError::Database(e)
            }
        })?;

        tracing::info!(
            user_id = %user_id,
            address = %owned.address,
            currency = %owned.currency,
            "Address claimed"
        );

        Ok(owned)
    }

    /// Remove a claim. Refused while any order still references the address.
    pub async fn unclaim(pool: &PgPool, user_id: Uuid, address: &str) -> Result<(), AppError> {
        let owned = Self::find(pool, user_id, address)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Address {} is not marked as mine", address)))?;

        let (pending,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM orders WHERE deposit_address_id = $1 AND NOT completed",
        )
        .bind(owned.id)
        .fetch_one(pool)
        .await?;
        if pending > 0 {
            return Err(AppError::AddressInUse(format!(
                "{} is the deposit address of a pending order",
                address
            )));
        }

        sqlx::query("DELETE FROM owned_addresses WHERE id = $1")
            .bind(owned.id)
            .execute(pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::AddressInUse(format!(
                        "{} is referenced by completed orders",
                        address
                    ))
                } else {
                    AppError::Database(e)
                }
            })?;

        tracing::info!(user_id = %user_id, address, "Address unclaimed");

        Ok(())
    }

    /// All addresses claimed by a user, in claim order.
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<OwnedAddress>, AppError> {
        let addresses: Vec<OwnedAddress> = sqlx::query_as(
            "SELECT * FROM owned_addresses WHERE user_id = $1 ORDER BY claimed_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(addresses)
    }

    /// The user's claim on `address`, if any.
    pub async fn find(
        pool: &PgPool,
        user_id: Uuid,
        address: &str,
    ) -> Result<Option<OwnedAddress>, AppError> {
        let owned: Option<OwnedAddress> =
            sqlx::query_as("SELECT * FROM owned_addresses WHERE user_id = $1 AND address = $2")
                .bind(user_id)
                .bind(address)
                .fetch_optional(pool)
                .await?;

        Ok(owned)
    }
}
