//! Search log: ledger lookups on behalf of a user, each recorded as an
//! append-only `SearchRecord` whether it succeeded or not.
//!
//! Successful address searches are what later allow the user to claim the
//! address (see `inventory`).

use sqlx::PgPool;
use uuid::Uuid;

use blockdesk_common::error::AppError;
use blockdesk_common::types::{SearchKind, SearchRecord};
use blockdesk_ledger::{LedgerClient, LedgerError};

use crate::validation::{validate_address, validate_transaction};

/// Service layer for searches and the search log.
pub struct SearchService;

impl SearchService {
    /// Look up an address on the ledger and log the attempt.
    ///
    /// Returns the explorer's payload unchanged. Any upstream failure is
    /// logged as an invalid search and reported as `LookupFailed`.
    pub async fn search_address(
        pool: &PgPool,
        ledger: &dyn LedgerClient,
        user_id: Uuid,
        address: &str,
    ) -> Result<serde_json::Value, AppError> {
        validate_address(address)?;
        let outcome = ledger.address(address).await;
        Self::finish(pool, user_id, SearchKind::Address, address, outcome).await
    }

    /// Look up a transaction on the ledger and log the attempt.
    pub async fn search_transaction(
        pool: &PgPool,
        ledger: &dyn LedgerClient,
        user_id: Uuid,
        hash: &str,
    ) -> Result<serde_json::Value, AppError> {
        validate_transaction(hash)?;
        let outcome = ledger.transaction(hash).await;
        Self::finish(pool, user_id, SearchKind::Transaction, hash, outcome).await
    }

    async fn finish(
        pool: &PgPool,
        user_id: Uuid,
        kind: SearchKind,
        query: &str,
        outcome: Result<serde_json::Value, LedgerError>,
    ) -> Result<serde_json::Value, AppError> {
        Self::record(pool, user_id, kind, query, outcome.is_ok()).await?;

        outcome.map_err(|e| {
            tracing::info!(
                user_id = %user_id,
                kind = %kind,
                query,
                error = %e,
                "Ledger lookup failed"
            );
            AppError::LookupFailed(format!("No {} found for '{}'", kind, query))
        })
    }

    /// Append a search record.
    pub async fn record(
        pool: &PgPool,
        user_id: Uuid,
        kind: SearchKind,
        query: &str,
        valid: bool,
    ) -> Result<SearchRecord, AppError> {
        let record: SearchRecord = sqlx::query_as(
            r#"
            INSERT INTO search_records (user_id, kind, query, valid)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(kind.to_string())
        .bind(query)
        .bind(valid)
        .fetch_one(pool)
        .await?;

        tracing::debug!(
            user_id = %user_id,
            kind = %kind,
            query,
            valid,
            "Search recorded"
        );

        Ok(record)
    }

    /// The user's past searches, oldest first, optionally of one kind.
    pub async fn history(
        pool: &PgPool,
        user_id: Uuid,
        kind: Option<SearchKind>,
    ) -> Result<Vec<SearchRecord>, AppError> {
        let records: Vec<SearchRecord> = sqlx::query_as(
            r#"
            SELECT * FROM search_records
            WHERE user_id = $1 AND ($2::text IS NULL OR kind = $2)
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .bind(kind.map(|k| k.to_string()))
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Validity of the user's most recent search for `address`, or `None`
    /// if they never searched it.
    pub async fn latest_validity(
        pool: &PgPool,
        user_id: Uuid,
        address: &str,
    ) -> Result<Option<bool>, AppError> {
        let row: Option<(bool,)> = sqlx::query_as(
            r#"
            SELECT valid FROM search_records
            WHERE user_id = $1 AND kind = 'address' AND query = $2
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(address)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(valid,)| valid))
    }
}
