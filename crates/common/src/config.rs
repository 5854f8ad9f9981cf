use serde::Deserialize;

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Redis connection string
    pub redis_url: String,

    /// JWT secret for API authentication
    pub jwt_secret: String,

    /// JWT token expiry in hours
    pub jwt_expiry_hours: u64,

    /// Maximum number of PostgreSQL connections in the pool (default: 20)
    pub db_max_connections: u32,

    /// Port the HTTP API binds to on all interfaces (default: 3000)
    pub api_port: u16,

    /// Base URL of the blockchain explorer API (default: https://blockchain.info)
    pub ledger_api_url: String,

    /// Upper bound on a single ledger lookup, in seconds (default: 10)
    pub ledger_timeout_secs: u64,

    /// Minimum spacing between two searches by the same user; 0 disables (default: 10)
    pub search_throttle_seconds: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?,
            jwt_expiry_hours: parse_var("JWT_EXPIRY_HOURS", "24")?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "20")?,
            api_port: parse_var("API_PORT", "3000")?,
            ledger_api_url: std::env::var("LEDGER_API_URL")
                .unwrap_or_else(|_| "https://blockchain.info".to_string())
                .trim_end_matches('/')
                .to_string(),
            ledger_timeout_secs: parse_var("LEDGER_TIMEOUT_SECS", "10")?,
            search_throttle_seconds: parse_var("SEARCH_THROTTLE_SECONDS", "10")?,
        })
    }
}

/// Read a numeric variable, falling back to `default` when unset.
fn parse_var<T: std::str::FromStr>(name: &str, default: &str) -> anyhow::Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| {
            anyhow::anyhow!(
                "{} must be a valid {}",
                name,
                std::any::type_name::<T>()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default() {
        let port: u16 = parse_var("BLOCKDESK_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_var_rejects_garbage_default() {
        let result: anyhow::Result<u64> = parse_var("BLOCKDESK_TEST_UNSET_SECS", "ten");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("BLOCKDESK_TEST_UNSET_SECS"));
    }
}
