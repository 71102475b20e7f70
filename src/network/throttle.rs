//! Outbound request pacing
//!
//! Every Wikipedia call is preceded by a short fixed pause to keep request
//! bursts polite. This is not a rate limiter: no token bucket, no adaptive
//! backoff. The pause is behind a trait so tests can run without waiting.

use async_trait::async_trait;
use std::time::Duration;

/// Wait policy applied before each outbound request
#[async_trait]
pub trait Throttle: Send + Sync {
    /// Suspend until the next request may be issued
    async fn pause(&self);
}

/// Fixed delay before every request
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(millis: u64) -> Self {
        Self {
            delay: Duration::from_millis(millis),
        }
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// No-op policy for tests
pub struct NoDelay;

#[async_trait]
impl Throttle for NoDelay {
    async fn pause(&self) {}
}
