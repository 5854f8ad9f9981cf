//! HTTP client for a blockchain.info-compatible explorer API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{BalanceSheet, LedgerClient, LedgerError};

/// Explorer client with a bounded per-request timeout.
#[derive(Clone)]
pub struct BlockchainInfoClient {
    client: Client,
    base_url: String,
}

impl BlockchainInfoClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LedgerError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .header("content-type", "application/json")
            .query(query)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(url = %url, error = %e, "Ledger request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Ledger lookup unsuccessful");
            return Err(LedgerError::Status(status.as_u16()));
        }

        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl LedgerClient for BlockchainInfoClient {
    async fn address(&self, address: &str) -> Result<serde_json::Value, LedgerError> {
        self.get(&format!("/rawaddr/{}", address), &[]).await
    }

    async fn transaction(&self, hash: &str) -> Result<serde_json::Value, LedgerError> {
        self.get(&format!("/rawtx/{}", hash), &[]).await
    }

    async fn balances(&self, addresses: &[String]) -> Result<BalanceSheet, LedgerError> {
        let active = addresses.join("|");
        self.get("/balance", &[("active", active.as_str())]).await
    }
}
