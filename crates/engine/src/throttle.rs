//! Search throttle: Redis-backed per-user spacing between ledger lookups.
//!
//! Each search takes a short-lived key; while the key exists further
//! searches by the same user are rejected. Uses Redis `SET NX EX` for an
//! atomic check-and-set with automatic TTL expiry.

use redis::aio::ConnectionManager;
use uuid::Uuid;

use blockdesk_common::error::AppError;

/// Per-user search throttle. A zero interval disables it.
#[derive(Debug, Clone, Copy)]
pub struct SearchThrottle {
    interval_secs: u64,
}

impl SearchThrottle {
    pub fn new(interval_secs: u64) -> Self {
        Self { interval_secs }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_secs > 0
    }

    fn key(user_id: Uuid) -> String {
        format!("search:throttle:{}", user_id)
    }

    /// Take the user's search slot, or fail with `RateLimited`.
    ///
    /// `SET key "1" NX EX interval` returns `Some("OK")` when the slot was
    /// free and `None` while an earlier search still holds it.
    pub async fn acquire(
        &self,
        redis: &mut ConnectionManager,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let result: Option<String> = redis::cmd("SET")
            .arg(Self::key(user_id))
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(self.interval_secs)
            .query_async(redis)
            .await?;

        if result.is_none() {
            tracing::debug!(
                user_id = %user_id,
                interval_secs = self.interval_secs,
                "Search rejected, user throttled"
            );
            return Err(AppError::RateLimited(self.interval_secs));
        }

        Ok(())
    }
}
