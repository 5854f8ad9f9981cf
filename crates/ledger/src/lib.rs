//! Client for the external blockchain explorer.
//!
//! The service never interprets address or transaction payloads; it only
//! forwards them to the caller. Balances are the one response it reads,
//! to sum `final_balance` across a user's addresses.

pub mod balance;
pub mod blockchain_info;

use async_trait::async_trait;
use thiserror::Error;

pub use balance::{AddressBalance, BalanceSheet};
pub use blockchain_info::BlockchainInfoClient;

/// Failure of a single ledger lookup. Callers treat every variant as
/// "not found" rather than as a server fault.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger request timed out")]
    Timeout,

    #[error("ledger returned HTTP {0}")]
    Status(u16),

    #[error("ledger transport error: {0}")]
    Transport(String),

    #[error("ledger response could not be decoded: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LedgerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LedgerError::Timeout
        } else if err.is_decode() {
            LedgerError::Decode(err.to_string())
        } else {
            LedgerError::Transport(err.to_string())
        }
    }
}

/// Lookups the service needs from a blockchain data provider.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Raw address summary (`/rawaddr/{address}`).
    async fn address(&self, address: &str) -> Result<serde_json::Value, LedgerError>;

    /// Raw transaction (`/rawtx/{hash}`).
    async fn transaction(&self, hash: &str) -> Result<serde_json::Value, LedgerError>;

    /// Balances for several addresses in one call (`/balance?active=a|b`).
    async fn balances(&self, addresses: &[String]) -> Result<BalanceSheet, LedgerError>;
}
