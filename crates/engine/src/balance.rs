//! Aggregate balance across a user's owned addresses.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use blockdesk_common::error::AppError;
use blockdesk_ledger::LedgerClient;

use crate::inventory::AddressInventory;

/// Sum of `final_balance` over the user's addresses, in satoshis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    pub balance: i64,
    pub addresses: usize,
}

pub struct BalanceService;

impl BalanceService {
    /// Query the ledger for every owned address and sum the balances.
    ///
    /// A user with no addresses has a zero balance and no upstream call is
    /// made. An upstream failure is reported as `NotFound`.
    pub async fn total(
        pool: &PgPool,
        ledger: &dyn LedgerClient,
        user_id: Uuid,
    ) -> Result<BalanceSummary, AppError> {
        let addresses: Vec<String> = AddressInventory::list(pool, user_id)
            .await?
            .into_iter()
            .map(|owned| owned.address)
            .collect();

        if addresses.is_empty() {
            return Ok(BalanceSummary {
                balance: 0,
                addresses: 0,
            });
        }

        let sheet = ledger.balances(&addresses).await.map_err(|e| {
            tracing::info!(user_id = %user_id, error = %e, "Balance lookup failed");
            AppError::NotFound("Balance is unavailable for these addresses".to_string())
        })?;

        Ok(BalanceSummary {
            balance: sheet.total(),
            addresses: addresses.len(),
        })
    }
}
