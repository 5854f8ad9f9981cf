use redis::Client;
use redis::aio::ConnectionManager;

/// Open a Redis connection manager and verify the server answers `PING`.
///
/// The manager reconnects on its own, so a single instance is cloned into
/// every handler that needs Redis (currently only the search throttle).
pub async fn create_redis_pool(redis_url: &str) -> anyhow::Result<ConnectionManager> {
    let client = Client::open(redis_url)?;
    let mut manager = ConnectionManager::new(client).await?;

    let pong: String = redis::cmd("PING").query_async(&mut manager).await?;
    tracing::info!(reply = %pong, "Connected to Redis");
    Ok(manager)
}
