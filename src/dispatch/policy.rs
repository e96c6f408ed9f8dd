//! Failure classes and the backoff schedule

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the dispatcher treats a failed call with an HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 401, 403, 404: report "no data"
    Unavailable,
    /// 429: wait out the quota window
    QuotaExceeded,
    /// 500, 502, 503, 504: back off and retry
    Transient,
    /// Everything else
    Fatal,
}

impl FailureClass {
    /// Classify an HTTP status code
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 | 404 => Self::Unavailable,
            429 => Self::QuotaExceeded,
            500 | 502 | 503 | 504 => Self::Transient,
            _ => Self::Fatal,
        }
    }
}

/// Canonical reason phrase for a status, "Unknown" when there is none
pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// Retry timings, in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// First wait after a transient failure
    pub base_wait_secs: f64,
    /// Growth factor applied after each transient failure
    pub multiplier: f64,
    /// Give up once the next wait would reach this value
    pub ceiling_secs: f64,
    /// Fixed wait after a quota failure
    pub cooldown_secs: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_wait_secs: 1.0,
            multiplier: 1.5,
            ceiling_secs: 30.0 * 60.0,
            cooldown_secs: 15.0 * 60.0,
        }
    }
}

impl RetryPolicy {
    /// Quota cooldown as a duration
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.cooldown_secs)
    }

    /// Check that every timing is usable
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.base_wait_secs > 0.0 && self.base_wait_secs.is_finite()) {
            return Err(crate::Error::config("retry.base_wait_secs must be positive"));
        }
        if !(self.multiplier > 1.0 && self.multiplier.is_finite()) {
            return Err(crate::Error::config("retry.multiplier must be greater than 1"));
        }
        if !(self.ceiling_secs > self.base_wait_secs && self.ceiling_secs.is_finite()) {
            return Err(crate::Error::config(
                "retry.ceiling_secs must exceed retry.base_wait_secs",
            ));
        }
        if !(self.cooldown_secs >= 0.0 && self.cooldown_secs.is_finite()) {
            return Err(crate::Error::config("retry.cooldown_secs must not be negative"));
        }
        Ok(())
    }
}

/// Current wait of one dispatch call's retry loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    wait_secs: f64,
}

impl Backoff {
    /// Start at the policy's base wait
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            wait_secs: policy.base_wait_secs,
        }
    }

    /// Current wait in seconds
    pub fn wait_secs(&self) -> f64 {
        self.wait_secs
    }

    /// Current wait as a duration
    pub fn current(&self) -> Duration {
        Duration::from_secs_f64(self.wait_secs)
    }

    /// Grow the wait after a transient failure
    ///
    /// Returns `false` once the grown wait reaches the ceiling.
    pub fn grow(&mut self, policy: &RetryPolicy) -> bool {
        self.wait_secs *= policy.multiplier;
        self.wait_secs < policy.ceiling_secs
    }

    /// Return to the base wait
    pub fn reset(&mut self, policy: &RetryPolicy) {
        self.wait_secs = policy.base_wait_secs;
    }
}
