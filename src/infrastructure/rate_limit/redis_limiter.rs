//! Redis-backed rate limiter.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, Script, aio::ConnectionManager};
use tracing::{debug, info, warn};

use crate::domain::limiter::{RateLimitError, RateLimiter};
use crate::domain::rate_limit::RateWindow;

/// Checks every window first and increments only if all of them have room.
///
/// `KEYS[i]` is the counter of window `i`; `ARGV[2i-1]` its amount and
/// `ARGV[2i]` its period in seconds. A counter expires one period after its
/// first hit.
const CHECK_AND_INCREMENT_SCRIPT: &str = r"
for i = 1, #KEYS do
  local current = tonumber(redis.call('GET', KEYS[i])) or 0
  if current >= tonumber(ARGV[2 * i - 1]) then
    return 0
  end
end
for i = 1, #KEYS do
  if redis.call('INCR', KEYS[i]) == 1 then
    redis.call('EXPIRE', KEYS[i], ARGV[2 * i])
  end
end
return 1
";

impl From<RedisError> for RateLimitError {
    fn from(e: RedisError) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Fixed-window counters shared through Redis.
///
/// Every instance of the service pointing at the same Redis (and key prefix)
/// enforces the same limits. The check and the increments run as a single
/// Lua script, so a request is either counted against all windows or none.
pub struct RedisRateLimiter {
    connection: ConnectionManager,
    key_prefix: String,
    script: Script,
}

impl RedisRateLimiter {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - Namespace prepended to every counter key
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Storage`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(
        redis_url: &str,
        key_prefix: impl Into<String>,
    ) -> Result<Self, RateLimitError> {
        let client = Client::open(redis_url).map_err(|e| {
            RateLimitError::Storage(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            RateLimitError::Storage(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| RateLimitError::Storage(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis rate limit store");

        Ok(Self {
            connection: manager,
            key_prefix: key_prefix.into(),
            script: Script::new(CHECK_AND_INCREMENT_SCRIPT),
        })
    }

    fn build_key(&self, client_key: &str, window: &RateWindow) -> String {
        format!("{}{}", self.key_prefix, window.counter_key(client_key))
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check_and_increment(
        &self,
        client_key: &str,
        windows: &[RateWindow],
    ) -> Result<bool, RateLimitError> {
        if windows.is_empty() {
            return Ok(true);
        }

        let mut invocation = self.script.prepare_invoke();
        for window in windows {
            invocation
                .key(self.build_key(client_key, window))
                .arg(window.limit.amount)
                .arg(window.limit.period.as_secs());
        }

        let mut conn = self.connection.clone();
        let allowed: i64 = invocation.invoke_async(&mut conn).await.map_err(|e| {
            warn!("Redis rate limit script failed for {}: {}", client_key, e);
            RateLimitError::from(e)
        })?;

        debug!(client = client_key, allowed = allowed == 1, "Rate limit checked");

        Ok(allowed == 1)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.connection.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
