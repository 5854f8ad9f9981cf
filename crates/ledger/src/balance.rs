use std::collections::HashMap;

use serde::Deserialize;

/// Per-address entry of the multi-address balance response. Amounts are in
/// satoshis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressBalance {
    #[serde(default)]
    pub final_balance: i64,
    #[serde(default)]
    pub n_tx: u64,
    #[serde(default)]
    pub total_received: i64,
}

/// Multi-address balance response keyed by address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BalanceSheet(pub HashMap<String, AddressBalance>);

impl BalanceSheet {
    /// Sum of `final_balance` over every address in the sheet.
    pub fn total(&self) -> i64 {
        self.0.values().map(|b| b.final_balance).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
