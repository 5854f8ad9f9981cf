//! Order allocator: picks the deposit address for a new order.
//!
//! An owned address is available while no pending order references it.
//! Candidates are ordered by `(claimed_at, id)` so the pick is stable.
//!
//! `allocate` must run inside the transaction that inserts the order: the
//! chosen row is locked `FOR UPDATE SKIP LOCKED`, so a concurrent allocation
//! moves on to the next candidate instead of binding the same address. The
//! partial unique index `orders_one_pending_per_address` backs this up.

use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use blockdesk_common::error::AppError;
use blockdesk_common::types::OwnedAddress;

/// Deposit-address allocator.
pub struct OrderAllocator;

impl OrderAllocator {
    /// Owned addresses of `user_id` in `currency` not bound to a pending order.
    pub async fn available<'e>(
        executor: impl PgExecutor<'e>,
        user_id: Uuid,
        currency: &str,
    ) -> Result<Vec<OwnedAddress>, AppError> {
        let addresses: Vec<OwnedAddress> = sqlx::query_as(
            r#"
            SELECT oa.*
            FROM owned_addresses oa
            WHERE oa.user_id = $1
              AND oa.currency = $2
              AND NOT EXISTS (
                  SELECT 1 FROM orders o
                  WHERE o.deposit_address_id = oa.id AND NOT o.completed
              )
            ORDER BY oa.claimed_at ASC, oa.id ASC
            "#,
        )
        .bind(user_id)
        .bind(currency)
        .fetch_all(executor)
        .await?;

        Ok(addresses)
    }

    /// Lock and return the first available address, or `NoAvailableAddress`.
    pub async fn allocate(
        conn: &mut PgConnection,
        user_id: Uuid,
        currency: &str,
    ) -> Result<OwnedAddress, AppError> {
        let picked: Option<OwnedAddress> = sqlx::query_as(
            r#"
            SELECT oa.*
            FROM owned_addresses oa
            WHERE oa.user_id = $1
              AND oa.currency = $2
              AND NOT EXISTS (
                  SELECT 1 FROM orders o
                  WHERE o.deposit_address_id = oa.id AND NOT o.completed
              )
            ORDER BY oa.claimed_at ASC, oa.id ASC
            LIMIT 1
            FOR UPDATE OF oa SKIP LOCKED
            "#,
        )
        .bind(user_id)
        .bind(currency)
        .fetch_optional(&mut *conn)
        .await?;

        match picked {
            Some(address) => {
                tracing::debug!(
                    user_id = %user_id,
                    currency,
                    address = %address.address,
                    "Deposit address allocated"
                );
                Ok(address)
            }
            None => {
                tracing::debug!(user_id = %user_id, currency, "No deposit address available");
                Err(AppError::NoAvailableAddress)
            }
        }
    }
}
