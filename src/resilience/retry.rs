//! Retry policy with exponential backoff and jitter.
//!
//! # Responsibilities
//! - Decide how many attempts a resource operation gets
//! - Compute the delay between attempts
//!
//! Jittered backoff prevents synchronized retries; only errors classified
//! transient by [`crate::cluster::SeedError::is_transient`] are retried at
//! all, and never past the configured attempt cap.

use std::time::Duration;

use rand::Rng;

use crate::config::schema::RetryConfig;

/// Immutable retry parameters derived from config.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    enabled: bool,
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_attempts: config.max_attempts,
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }

    /// Total attempts an operation gets, including the first.
    pub fn attempts(&self) -> u32 {
        if self.enabled {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    /// Delay before the attempt following `completed_attempts` failures.
    ///
    /// Doubles per attempt from the base, saturating at the configured cap,
    /// with 0-10% jitter on top.
    pub fn delay_for(&self, completed_attempts: u32) -> Duration {
        if completed_attempts == 0 {
            return Duration::from_millis(0);
        }

        let exponential = 2u64.saturating_pow(completed_attempts - 1);
        let delay_ms = self.base_delay_ms.saturating_mul(exponential);
        let capped = delay_ms.min(self.max_delay_ms);

        let jitter_range = capped / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0..jitter_range)
        } else {
            0
        };

        Duration::from_millis(capped + jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(&RetryConfig::default())
    }
}
