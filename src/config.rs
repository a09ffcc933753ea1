//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Rate limit store
//!
//! ### Method 1: Full URL
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! ### Method 2: Individual components
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without either, counters are kept in process memory.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:5000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IP from forwarding headers (default: `false`)
//! - `RATE_LIMIT_DEFAULT` - Limits shared by all routes (default: `1000 per day;100 per hour`)
//! - `RATE_LIMIT_SENTIMENT` - Extra limits for `/sentiment` (default: `10 per hour`)
//! - `RATE_LIMIT_KEY_PREFIX` - Redis key namespace (default: `sentiment-api:ratelimit:`)

use anyhow::{Context, Result};
use std::env;

use crate::api::routes::SENTIMENT_PATH;
use crate::domain::rate_limit::{RateLimit, RateLimitPolicy};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_LIMITS: &str = "1000 per day;100 per hour";
const DEFAULT_SENTIMENT_LIMITS: &str = "10 per hour";
const DEFAULT_KEY_PREFIX: &str = "sentiment-api:ratelimit:";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub redis_url: Option<String>,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Limit expressions applied to every route, shared across routes.
    pub default_limits: String,
    /// Limit expressions applied to `/sentiment` on top of the defaults.
    pub sentiment_limits: String,
    /// Namespace for counter keys in Redis.
    pub rate_limit_key_prefix: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Every variable is optional; see the module docs for defaults.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let redis_url = Self::load_redis_url();

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let default_limits =
            env::var("RATE_LIMIT_DEFAULT").unwrap_or_else(|_| DEFAULT_LIMITS.to_string());
        let sentiment_limits =
            env::var("RATE_LIMIT_SENTIMENT").unwrap_or_else(|_| DEFAULT_SENTIMENT_LIMITS.to_string());
        let rate_limit_key_prefix =
            env::var("RATE_LIMIT_KEY_PREFIX").unwrap_or_else(|_| DEFAULT_KEY_PREFIX.to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            redis_url,
            behind_proxy,
            default_limits,
            sentiment_limits,
            rate_limit_key_prefix,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match env::var("REDIS_PASSWORD") {
            Ok(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Builds the rate limit policy from the configured expressions.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable if an expression does not parse.
    pub fn rate_limit_policy(&self) -> Result<RateLimitPolicy> {
        let defaults =
            RateLimit::parse_many(&self.default_limits).context("Invalid RATE_LIMIT_DEFAULT")?;
        let sentiment = RateLimit::parse_many(&self.sentiment_limits)
            .context("Invalid RATE_LIMIT_SENTIMENT")?;

        Ok(RateLimitPolicy::new(defaults).with_route(SENTIMENT_PATH, sentiment))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the Redis URL has the wrong scheme
    /// - a rate limit expression does not parse
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.rate_limit_key_prefix.is_empty() {
            anyhow::bail!("RATE_LIMIT_KEY_PREFIX must not be empty");
        }

        self.rate_limit_policy()?;

        Ok(())
    }

    /// Returns whether counters are shared through Redis.
    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Rate limit store: {} (redis)", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Rate limit store: in-memory");
        }

        tracing::info!("  Default limits: {}", self.default_limits);
        tracing::info!("  Sentiment limits: {}", self.sentiment_limits);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks the password in connection strings for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    let Some(start) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[start + 3..];

    match rest.find('@') {
        Some(at_pos) => match rest[..at_pos].rfind(':') {
            Some(colon_pos) => format!(
                "{}://{}:***{}",
                &url[..start],
                &rest[..colon_pos],
                &rest[at_pos..]
            ),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
