//! Clock and delay abstractions for determinism.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Abstraction over system time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Abstraction over the fixed timers that pace timed stages.
#[async_trait]
pub trait Delay: Send + Sync {
    /// Suspend for the given duration.
    async fn wait(&self, duration: Duration);
}

/// Production delay backed by the tokio timer.
///
/// `scale_percent` stretches or shrinks every wait; `0` makes every timer
/// fire immediately.
#[derive(Debug, Clone, Copy)]
pub struct TokioDelay {
    scale_percent: u32,
}

impl TokioDelay {
    /// A delay that waits exactly as long as asked.
    #[must_use]
    pub fn new() -> Self {
        Self { scale_percent: 100 }
    }

    /// A delay that waits `scale_percent`% of each requested duration.
    #[must_use]
    pub fn scaled(scale_percent: u32) -> Self {
        Self { scale_percent }
    }

    /// The duration actually slept for a requested one.
    #[must_use]
    pub fn scale(&self, duration: Duration) -> Duration {
        duration * self.scale_percent / 100
    }
}

impl Default for TokioDelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        let scaled = self.scale(duration);
        if !scaled.is_zero() {
            tokio::time::sleep(scaled).await;
        }
    }
}
