//! Rate limit expressions, windows, and per-route policy.
//!
//! Limits are plain-text expressions, one or more per setting:
//!
//! ```text
//! 10 per hour
//! 10/hour
//! 100 per 2 hours
//! 1000 per day; 100 per hour
//! ```

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

/// Compiled pattern for a single limit expression.
static LIMIT_EXPRESSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*(?:/|per)\s*(\d+)?\s*(second|minute|hour|day|month|year)s?\s*$")
        .unwrap()
});

/// Scope shared by the default windows of every route.
pub const GLOBAL_SCOPE: &str = "global";

/// Errors produced while parsing limit expressions.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitParseError {
    #[error("invalid rate limit expression '{0}'")]
    Invalid(String),
    #[error("rate limit amount must be greater than zero in '{0}'")]
    ZeroAmount(String),
    #[error("rate limit period must be greater than zero in '{0}'")]
    ZeroPeriod(String),
}

/// `amount` requests per `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateLimit {
    pub amount: u32,
    pub period: Duration,
}

impl RateLimit {
    pub fn new(amount: u32, period: Duration) -> Self {
        Self { amount, period }
    }

    pub fn per_hour(amount: u32) -> Self {
        Self::new(amount, Duration::from_secs(3600))
    }

    pub fn per_day(amount: u32) -> Self {
        Self::new(amount, Duration::from_secs(86_400))
    }

    /// Parses a single expression such as `"10 per hour"` or `"10/hour"`.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitParseError`] if the expression does not match the
    /// grammar or has a zero amount or multiplier.
    pub fn parse(expression: &str) -> Result<Self, RateLimitParseError> {
        let captures = LIMIT_EXPRESSION_REGEX
            .captures(expression)
            .ok_or_else(|| RateLimitParseError::Invalid(expression.to_string()))?;

        let amount: u32 = captures[1]
            .parse()
            .map_err(|_| RateLimitParseError::Invalid(expression.to_string()))?;
        if amount == 0 {
            return Err(RateLimitParseError::ZeroAmount(expression.to_string()));
        }

        let multiplier: u64 = match captures.get(2) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| RateLimitParseError::Invalid(expression.to_string()))?,
            None => 1,
        };
        if multiplier == 0 {
            return Err(RateLimitParseError::ZeroPeriod(expression.to_string()));
        }

        let unit_seconds = granularity_seconds(&captures[3].to_ascii_lowercase());
        let seconds = unit_seconds
            .checked_mul(multiplier)
            .ok_or_else(|| RateLimitParseError::Invalid(expression.to_string()))?;

        Ok(Self::new(amount, Duration::from_secs(seconds)))
    }

    /// Parses a list of expressions separated by `;` or `,`.
    ///
    /// Blank entries are skipped, so an empty string yields no limits.
    ///
    /// # Errors
    ///
    /// Returns the first [`RateLimitParseError`] encountered.
    pub fn parse_many(expressions: &str) -> Result<Vec<Self>, RateLimitParseError> {
        expressions
            .split([';', ','])
            .filter(|part| !part.trim().is_empty())
            .map(Self::parse)
            .collect()
    }
}

impl fmt::Display for RateLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} per {}s", self.amount, self.period.as_secs())
    }
}

fn granularity_seconds(unit: &str) -> u64 {
    match unit {
        "second" => 1,
        "minute" => 60,
        "hour" => 3600,
        "day" => 86_400,
        "month" => 30 * 86_400,
        // twelve 30-day months
        _ => 12 * 30 * 86_400,
    }
}

/// A [`RateLimit`] bound to a counting scope.
///
/// Requests from one client share a counter only when both the scope and
/// the limit are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateWindow {
    pub scope: String,
    pub limit: RateLimit,
}

impl RateWindow {
    pub fn new(scope: impl Into<String>, limit: RateLimit) -> Self {
        Self {
            scope: scope.into(),
            limit,
        }
    }

    /// Storage key for this window and client.
    pub fn counter_key(&self, client_key: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            client_key,
            self.scope,
            self.limit.amount,
            self.limit.period.as_secs()
        )
    }
}

/// Which windows apply to which route.
#[derive(Debug, Clone, Default)]
pub struct RateLimitPolicy {
    defaults: Vec<RateWindow>,
    routes: HashMap<String, Vec<RateWindow>>,
}

impl RateLimitPolicy {
    /// Creates a policy whose default limits are shared across all routes.
    pub fn new(default_limits: impl IntoIterator<Item = RateLimit>) -> Self {
        Self {
            defaults: default_limits
                .into_iter()
                .map(|limit| RateWindow::new(GLOBAL_SCOPE, limit))
                .collect(),
            routes: HashMap::new(),
        }
    }

    /// Adds route-specific limits, enforced on top of the defaults.
    pub fn with_route(
        mut self,
        path: impl Into<String>,
        limits: impl IntoIterator<Item = RateLimit>,
    ) -> Self {
        let path = path.into();
        let windows: Vec<RateWindow> = limits
            .into_iter()
            .map(|limit| RateWindow::new(path.clone(), limit))
            .collect();
        self.routes.entry(path).or_default().extend(windows);
        self
    }

    /// Windows enforced for a request to `path`: route windows first, then defaults.
    pub fn windows_for(&self, path: &str) -> Vec<RateWindow> {
        self.routes
            .get(path)
            .into_iter()
            .flatten()
            .chain(self.defaults.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expressions() {
        assert_eq!(RateLimit::parse("10 per hour").unwrap(), RateLimit::per_hour(10));
        assert_eq!(RateLimit::parse("10/hour").unwrap(), RateLimit::per_hour(10));
        assert_eq!(RateLimit::parse("1000 per day").unwrap(), RateLimit::per_day(1000));
        assert_eq!(
            RateLimit::parse("100 per 2 hours").unwrap(),
            RateLimit::new(100, Duration::from_secs(7200))
        );
        assert_eq!(
            RateLimit::parse("  5 PER Minute ").unwrap(),
            RateLimit::new(5, Duration::from_secs(60))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            RateLimit::parse("lots per hour"),
            Err(RateLimitParseError::Invalid(_))
        ));
        assert!(matches!(
            RateLimit::parse("10 per fortnight"),
            Err(RateLimitParseError::Invalid(_))
        ));
        assert!(matches!(
            RateLimit::parse("0 per hour"),
            Err(RateLimitParseError::ZeroAmount(_))
        ));
        assert!(matches!(
            RateLimit::parse("10 per 0 hours"),
            Err(RateLimitParseError::ZeroPeriod(_))
        ));
    }

    #[test]
    fn test_parse_many() {
        let limits = RateLimit::parse_many("1000 per day;100 per hour").unwrap();
        assert_eq!(limits, vec![RateLimit::per_day(1000), RateLimit::per_hour(100)]);

        let limits = RateLimit::parse_many("1/second, 2/minute").unwrap();
        assert_eq!(limits.len(), 2);

        assert!(RateLimit::parse_many("").unwrap().is_empty());
        assert!(RateLimit::parse_many("10 per hour; nope").is_err());
    }

    #[test]
    fn test_policy_route_windows_come_first() {
        let policy = RateLimitPolicy::new([RateLimit::per_day(1000), RateLimit::per_hour(100)])
            .with_route("/sentiment", [RateLimit::per_hour(10)]);

        let windows = policy.windows_for("/sentiment");
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0], RateWindow::new("/sentiment", RateLimit::per_hour(10)));
        assert_eq!(windows[1].scope, GLOBAL_SCOPE);
        assert_eq!(windows[2].scope, GLOBAL_SCOPE);

        let windows = policy.windows_for("/health");
        assert_eq!(windows.len(), 2);
        assert!(windows.iter().all(|w| w.scope == GLOBAL_SCOPE));
    }

    #[test]
    fn test_with_route_accumulates_limits() {
        let policy = RateLimitPolicy::new(Vec::new())
            .with_route("/sentiment", [RateLimit::per_hour(10)])
            .with_route("/sentiment", [RateLimit::per_day(50)]);

        let windows = policy.windows_for("/sentiment");
        assert_eq!(
            windows,
            vec![
                RateWindow::new("/sentiment", RateLimit::per_hour(10)),
                RateWindow::new("/sentiment", RateLimit::per_day(50)),
            ]
        );
        assert!(policy.windows_for("/other").is_empty());
    }

    #[test]
    fn test_counter_key_separates_scope_and_limit() {
        let route = RateWindow::new("/sentiment", RateLimit::per_hour(10));
        let global = RateWindow::new(GLOBAL_SCOPE, RateLimit::per_hour(100));

        assert_eq!(route.counter_key("10.0.0.1"), "10.0.0.1//sentiment/10/3600");
        assert_ne!(route.counter_key("10.0.0.1"), global.counter_key("10.0.0.1"));
        assert_ne!(route.counter_key("10.0.0.1"), route.counter_key("10.0.0.2"));
    }
}
