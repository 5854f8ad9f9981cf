use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a search record looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Address,
    Transaction,
}

impl std::fmt::Display for SearchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchKind::Address => write!(f, "address"),
            SearchKind::Transaction => write!(f, "transaction"),
        }
    }
}

impl std::str::FromStr for SearchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address" => Ok(SearchKind::Address),
            "transaction" => Ok(SearchKind::Transaction),
            other => Err(format!(
                "Invalid search kind '{}'. Valid kinds: address, transaction",
                other
            )),
        }
    }
}

/// Order side. Encoded as a small integer on the wire and in the database.
///
/// A sell (`1`) deposits the pair's base currency, anything else deposits
/// the quote currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum Side {
    Buy = 0,
    Sell = 1,
}

impl TryFrom<i16> for Side {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Buy),
            1 => Ok(Side::Sell),
            other => Err(format!("Invalid side {}. Use 0 (buy) or 1 (sell)", other)),
        }
    }
}

impl From<Side> for i16 {
    fn from(side: Side) -> Self {
        side as i16
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One lookup attempt against the external ledger. Never updated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SearchRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub kind: SearchKind,
    pub query: String,
    pub valid: bool,
    pub timestamp: DateTime<Utc>,
}

/// An address a user has claimed as their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct OwnedAddress {
    pub id: i64,
    pub user_id: Uuid,
    pub address: String,
    pub currency: String,
    pub claimed_at: DateTime<Utc>,
}

/// An order joined with the deposit address it is bound to.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub deposit_address_id: i64,
    pub deposit_address: String,
    pub deposit_currency: String,
    pub amount: Decimal,
    pub pair: String,
    pub side: Side,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_wire_format() {
        assert_eq!(serde_json::to_value(Side::Sell).unwrap(), 1);
        assert_eq!(serde_json::to_value(Side::Buy).unwrap(), 0);
        let side: Side = serde_json::from_value(serde_json::json!(1)).unwrap();
        assert_eq!(side, Side::Sell);
    }

    #[test]
    fn test_side_rejects_unknown_code() {
        let result: Result<Side, _> = serde_json::from_value(serde_json::json!(7));
        assert!(result.is_err());
    }

    #[test]
    fn test_search_kind_parse() {
        assert_eq!("address".parse::<SearchKind>().unwrap(), SearchKind::Address);
        assert_eq!(
            "transaction".parse::<SearchKind>().unwrap(),
            SearchKind::Transaction
        );
        assert!("block".parse::<SearchKind>().is_err());
    }

    #[test]
    fn test_user_serialization_hides_secrets() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "pbkdf2_sha256$1$00$00".to_string(),
            api_key: Some("bd_secret".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("api_key").is_none());
        assert_eq!(json["username"], "alice");
    }
}
