//! Order lifecycle: pending orders bound to a deposit address, and their
//! transition to completed.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use blockdesk_common::error::{AppError, is_unique_violation};
use blockdesk_common::types::{Order, Side};

use crate::allocator::OrderAllocator;
use crate::validation::{TradingPair, validate_amount};

/// Order columns joined with the deposit address. Expects `o` / `oa` aliases.
const ORDER_COLUMNS: &str = r#"
    o.id, o.deposit_address_id, oa.address AS deposit_address,
    oa.currency AS deposit_currency, o.amount, o.pair, o.side,
    o.completed, o.created_at, o.updated_at
"#;

/// Allocate-and-insert attempts before giving up with `NoAvailableAddress`.
const ALLOCATION_ATTEMPTS: u32 = 2;

/// Parameters for creating a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderParams {
    pub amount: Decimal,
    pub pair: String,
    pub side: Side,
}

/// Service layer for orders.
pub struct OrderService;

impl OrderService {
    /// Create a pending order on a freshly allocated deposit address.
    ///
    /// Allocation and insert share one transaction; the allocated address is
    /// row-locked until commit. A pick that a concurrent order claimed first
    /// is retried once on a fresh snapshot.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        params: &CreateOrderParams,
    ) -> Result<Order, AppError> {
        let pair = TradingPair::parse(&params.pair)?;
        validate_amount(params.amount)?;
        let currency = pair.deposit_currency(params.side);

        for attempt in 1..=ALLOCATION_ATTEMPTS {
            if let Some(order) = Self::try_create(pool, user_id, currency, &pair, params).await? {
                tracing::info!(
                    order_id = order.id,
                    user_id = %user_id,
                    pair = %order.pair,
                    side = %order.side,
                    deposit_address = %order.deposit_address,
                    "Order created"
                );
                return Ok(order);
            }
            tracing::debug!(
                user_id = %user_id,
                currency,
                attempt,
                "Deposit address taken by a concurrent order"
            );
        }

        Err(AppError::NoAvailableAddress)
    }

    /// One allocate-and-insert transaction. `None` when the picked address
    /// already has a pending order committed by another transaction.
    async fn try_create(
        pool: &PgPool,
        user_id: Uuid,
        currency: &str,
        pair: &TradingPair,
        params: &CreateOrderParams,
    ) -> Result<Option<Order>, AppError> {
        let mut tx = pool.begin().await?;

        let deposit = OrderAllocator::allocate(&mut tx, user_id, currency).await?;

        let inserted: Result<Order, sqlx::Error> = sqlx::query_as(&format!(
            r#"
            WITH o AS (
                INSERT INTO orders (deposit_address_id, amount, pair, side)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT {ORDER_COLUMNS}
            FROM o JOIN owned_addresses oa ON oa.id = o.deposit_address_id
            "#
        ))
        .bind(deposit.id)
        .bind(params.amount)
        .bind(pair.to_string())
        .bind(i16::from(params.side))
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(order) => {
                tx.commit().await?;
                Ok(Some(order))
            }
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    /// Set an order's completed flag.
    ///
    /// Re-opening (`completed = false`) is accepted, but fails with
    /// `AddressInUse` if the deposit address has since been bound to another
    /// pending order.
    pub async fn complete(
        pool: &PgPool,
        user_id: Uuid,
        order_id: i64,
        completed: bool,
    ) -> Result<Order, AppError> {
        // Verify ownership
        let existing = Self::get(pool, user_id, order_id).await?;

        sqlx::query("UPDATE orders SET completed = $1, updated_at = NOW() WHERE id = $2")
            .bind(completed)
            .bind(existing.id)
            .execute(pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::AddressInUse(format!(
                        "{} is already bound to another pending order",
                        existing.deposit_address
                    ))
                } else {
                    AppError::Database(e)
                }
            })?;

        tracing::info!(order_id, user_id = %user_id, completed, "Order completion updated");

        Self::get(pool, user_id, order_id).await
    }

    /// Get one of the user's orders.
    pub async fn get(pool: &PgPool, user_id: Uuid, order_id: i64) -> Result<Order, AppError> {
        sqlx::query_as(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders o JOIN owned_addresses oa ON oa.id = o.deposit_address_id
            WHERE o.id = $1 AND oa.user_id = $2
            "#
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))
    }

    /// The user's orders, newest first, optionally filtered by completion.
    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        completed: Option<bool>,
    ) -> Result<Vec<Order>, AppError> {
        let orders: Vec<Order> = sqlx::query_as(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders o JOIN owned_addresses oa ON oa.id = o.deposit_address_id
            WHERE oa.user_id = $1 AND ($2::boolean IS NULL OR o.completed = $2)
            ORDER BY o.id DESC
            "#
        ))
        .bind(user_id)
        .bind(completed)
        .fetch_all(pool)
        .await?;

        Ok(orders)
    }
}
