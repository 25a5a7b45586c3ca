//! Test delay — resolves every timer immediately.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use treasure_core::time::Delay;

/// A delay that returns at once and remembers every duration it was asked
/// to wait.
#[derive(Debug, Default)]
pub struct InstantDelay {
    requested: Mutex<Vec<Duration>>,
}

impl InstantDelay {
    /// Creates a delay with an empty request log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the durations requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requested(&self) -> Vec<Duration> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Delay for InstantDelay {
    async fn wait(&self, duration: Duration) {
        self.requested.lock().unwrap().push(duration);
    }
}
