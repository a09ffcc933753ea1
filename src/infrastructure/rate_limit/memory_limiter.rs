//! Process-local fixed-window rate limiter.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::limiter::{RateLimitError, RateLimiter};
use crate::domain::rate_limit::RateWindow;

/// How often expired counters are dropped from the table.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Hits recorded for one client in one window.
#[derive(Debug, Clone, Copy)]
struct WindowCounter {
    count: u32,
    reset_at: Instant,
}

impl WindowCounter {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.reset_at
    }
}

struct Counters {
    entries: HashMap<String, WindowCounter>,
    next_sweep: Instant,
}

/// In-memory limiter with the same fixed-window semantics as the Redis backend.
///
/// A window opens on a client's first hit and closes one period later. Every
/// window is checked before any is incremented, all under one lock, so a
/// rejected request is counted against none of them.
///
/// Counters live in this process only. Used when Redis is not configured or
/// unreachable, and in tests.
pub struct InMemoryRateLimiter {
    counters: Mutex<Counters>,
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self {
            counters: Mutex::new(Counters {
                entries: HashMap::new(),
                next_sweep: Instant::now() + SWEEP_INTERVAL,
            }),
        }
    }
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        debug!("Using in-memory rate limiter");
        Self::default()
    }

    fn hit(
        &self,
        client_key: &str,
        windows: &[RateWindow],
        now: Instant,
    ) -> Result<bool, RateLimitError> {
        if let Some(window) = windows.iter().find(|w| w.limit.amount == 0) {
            return Err(RateLimitError::InvalidWindow(format!(
                "{} ({})",
                window.limit, window.scope
            )));
        }

        let mut counters = self
            .counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if now >= counters.next_sweep {
            let before = counters.entries.len();
            counters.entries.retain(|_, counter| !counter.is_expired(now));
            counters.next_sweep = now + SWEEP_INTERVAL;
            debug!(
                evicted = before - counters.entries.len(),
                "Expired rate limit counters swept"
            );
        }

        let keys: Vec<String> = windows.iter().map(|w| w.counter_key(client_key)).collect();

        for (window, key) in windows.iter().zip(&keys) {
            let used = counters
                .entries
                .get(key)
                .filter(|counter| !counter.is_expired(now))
                .map_or(0, |counter| counter.count);

            if used >= window.limit.amount {
                debug!(client = client_key, scope = %window.scope, limit = %window.limit, "Window exhausted");
                return Ok(false);
            }
        }

        for (window, key) in windows.iter().zip(keys) {
            let counter = counters.entries.entry(key).or_insert(WindowCounter {
                count: 0,
                reset_at: now + window.limit.period,
            });
            if counter.is_expired(now) {
                *counter = WindowCounter {
                    count: 0,
                    reset_at: now + window.limit.period,
                };
            }
            counter.count += 1;
        }

        Ok(true)
    }

    #[cfg(test)]
    fn tracked_counters(&self) -> usize {
        self.counters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entries
            .len()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check_and_increment(
        &self,
        client_key: &str,
        windows: &[RateWindow],
    ) -> Result<bool, RateLimitError> {
        self.hit(client_key, windows, Instant::now())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
