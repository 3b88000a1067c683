use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::constants::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};

/// Configuration for rate limiting
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Admissions allowed inside one window
    pub max_requests: usize,
    /// Length of the trailing window
    pub time_window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: RATE_LIMIT_MAX_REQUESTS,
            time_window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
        }
    }
}

/// Sliding-window admission control
///
/// Keeps the instant of every admission inside the trailing window. A call
/// is admitted when fewer than `max_requests` admissions remain in the
/// window after stale entries are purged.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    /// Admission instants, oldest first
    admissions: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        Self::with_config(RateLimitConfig {
            max_requests,
            time_window,
        })
    }

    pub fn with_config(config: RateLimitConfig) -> Self {
        Self {
            admissions: VecDeque::with_capacity(config.max_requests),
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Check and record an admission at the current instant
    pub fn is_allowed(&mut self) -> bool {
        self.is_allowed_at(Instant::now())
    }

    /// Check and record an admission at `now`
    ///
    /// Never fails: a denied call leaves the state untouched apart from
    /// purging expired admissions.
    pub fn is_allowed_at(&mut self, now: Instant) -> bool {
        self.purge(now);

        if self.admissions.len() >= self.config.max_requests {
            tracing::debug!(
                admitted = self.admissions.len(),
                max_requests = self.config.max_requests,
                "Rate limit denied admission"
            );
            return false;
        }

        self.admissions.push_back(now);
        true
    }

    /// Admissions still available right now
    pub fn remaining(&mut self) -> usize {
        self.purge(Instant::now());
        self.config.max_requests.saturating_sub(self.admissions.len())
    }

    /// Time until the next admission becomes possible, `None` if one is
    /// possible already
    pub fn retry_after(&mut self) -> Option<Duration> {
        self.retry_after_at(Instant::now())
    }

    pub fn retry_after_at(&mut self, now: Instant) -> Option<Duration> {
        self.purge(now);

        if self.admissions.len() < self.config.max_requests {
            return None;
        }

        // With max_requests == 0 nothing is ever admitted
        let oldest = match self.admissions.front() {
            Some(oldest) => *oldest,
            None => return Some(self.config.time_window),
        };

        Some(
            self.config
                .time_window
                .saturating_sub(now.saturating_duration_since(oldest)),
        )
    }

    /// Number of admissions currently held in the window
    pub fn admitted_count(&self) -> usize {
        self.admissions.len()
    }

    /// Drop admissions with `now - t >= time_window`
    fn purge(&mut self, now: Instant) {
        while let Some(oldest) = self.admissions.front() {
            if now.saturating_duration_since(*oldest) < self.config.time_window {
                break;
            }
            self.admissions.pop_front();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::with_config(RateLimitConfig::default())
    }
}
