//! Input validation shared by the services.
//!
//! Everything here is pure; failures are `AppError::Validation` with a
//! message suitable for returning to the caller.

use rust_decimal::Decimal;

use blockdesk_common::error::AppError;
use blockdesk_common::types::Side;

pub const MAX_ADDRESS_LEN: usize = 50;
pub const MAX_TRANSACTION_LEN: usize = 64;
const MIN_CURRENCY_LEN: usize = 2;
const MAX_CURRENCY_LEN: usize = 10;
const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 150;
const MIN_PASSWORD_LEN: usize = 8;

/// A parsed `BASE/QUOTE` trading pair with upper-cased currency codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingPair {
    pub base: String,
    pub quote: String,
}

impl TradingPair {
    pub fn parse(pair: &str) -> Result<Self, AppError> {
        let mut parts = pair.split('/');
        let (Some(base), Some(quote), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(AppError::Validation(format!(
                "Invalid pair '{}'. Expected BASE/QUOTE",
                pair
            )));
        };

        Ok(Self {
            base: normalize_currency(base)?,
            quote: normalize_currency(quote)?,
        })
    }

    /// Currency the user deposits for an order on this pair.
    ///
    /// Side `1` (sell) deposits the base currency; every other side deposits
    /// the quote currency.
    pub fn deposit_currency(&self, side: Side) -> &str {
        if i16::from(side) == 1 {
            &self.base
        } else {
            &self.quote
        }
    }
}

impl std::fmt::Display for TradingPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

fn is_alphanumeric(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Blockchain address: base58 or hash160, at most 50 characters.
pub fn validate_address(address: &str) -> Result<(), AppError> {
    if address.is_empty() || address.len() > MAX_ADDRESS_LEN || !is_alphanumeric(address) {
        return Err(AppError::Validation(format!(
            "Address must be 1-{} alphanumeric characters",
            MAX_ADDRESS_LEN
        )));
    }
    Ok(())
}

/// Transaction hash: hex, at most 64 characters.
pub fn validate_transaction(hash: &str) -> Result<(), AppError> {
    if hash.is_empty() || hash.len() > MAX_TRANSACTION_LEN || !is_alphanumeric(hash) {
        return Err(AppError::Validation(format!(
            "Transaction must be 1-{} alphanumeric characters",
            MAX_TRANSACTION_LEN
        )));
    }
    Ok(())
}

/// Trim and upper-case a currency code.
pub fn normalize_currency(currency: &str) -> Result<String, AppError> {
    let code = currency.trim();
    if code.len() < MIN_CURRENCY_LEN || code.len() > MAX_CURRENCY_LEN || !is_alphanumeric(code) {
        return Err(AppError::Validation(format!(
            "Invalid currency '{}'. Expected {}-{} alphanumeric characters",
            currency, MIN_CURRENCY_LEN, MAX_CURRENCY_LEN
        )));
    }
    Ok(code.to_ascii_uppercase())
}

pub fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    let username_ok = (MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_.@+-".contains(c));
    if !username_ok {
        return Err(AppError::Validation(format!(
            "Username must be {}-{} characters of letters, digits and _.@+-",
            MIN_USERNAME_LEN, MAX_USERNAME_LEN
        )));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_pair() {
        let pair = TradingPair::parse("btc/usd").unwrap();
        assert_eq!(pair.base, "BTC");
        assert_eq!(pair.quote, "USD");
        assert_eq!(pair.to_string(), "BTC/USD");
    }

    #[test]
    fn test_parse_pair_rejects_malformed() {
        assert!(TradingPair::parse("BTCUSD").is_err());
        assert!(TradingPair::parse("BTC/").is_err());
        assert!(TradingPair::parse("/USD").is_err());
        assert!(TradingPair::parse("BTC/USD/EUR").is_err());
        assert!(TradingPair::parse("").is_err());
    }

    #[test]
    fn test_sell_deposits_base_currency() {
        let pair = TradingPair::parse("BTC/USD").unwrap();
        assert_eq!(pair.deposit_currency(Side::Sell), "BTC");
    }

    #[test]
    fn test_buy_deposits_quote_currency() {
        let pair = TradingPair::parse("BTC/USD").unwrap();
        assert_eq!(pair.deposit_currency(Side::Buy), "USD");
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("1BoatSLRHtKNngkdXEeobR76b53LETtpyT").is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address(&"a".repeat(51)).is_err());
        assert!(validate_address("1Boat/../x").is_err());
    }

    #[test]
    fn test_validate_transaction() {
        assert!(
            validate_transaction(
                "129efb63b30b8a275691b6e24904022f5a6299705afe2816b05752bf3559a0e9"
            )
            .is_ok()
        );
        assert!(validate_transaction(&"f".repeat(65)).is_err());
    }

    #[test]
    fn test_normalize_currency() {
        assert_eq!(normalize_currency(" btc ").unwrap(), "BTC");
        assert!(normalize_currency("B").is_err());
        assert!(normalize_currency("B-TC").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(dec!(123.00)).is_ok());
        assert!(validate_amount(dec!(0)).is_err());
        assert!(validate_amount(dec!(-1.5)).is_err());
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("testLogin", "testPassword.1").is_ok());
        assert!(validate_credentials("ab", "testPassword.1").is_err());
        assert!(validate_credentials("test login", "testPassword.1").is_err());
        assert!(validate_credentials("testLogin", "short").is_err());
    }
}
