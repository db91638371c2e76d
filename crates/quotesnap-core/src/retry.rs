//! Retry policy with linear backoff.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Retry budget for upstream quote calls.
///
/// The delay grows by a fixed step for each failed attempt, so the schedule
/// for the default policy is 1.5s, 3.0s, 4.5s between attempts. No delay is
/// taken after the final failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Backoff increment per failed attempt.
    pub backoff_step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            backoff_step: Duration::from_millis(1500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_step: Duration) -> Self {
        Self {
            max_attempts,
            backoff_step,
        }
    }

    /// Delay taken after the given failed attempt (0-based), a pure
    /// function of the attempt index.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff_step * (attempt + 1)
    }
}

/// Clock/sleep contract so tests can record delays instead of waiting.
pub trait Sleeper: Send + Sync {
    fn sleep<'a>(
        &'a self,
        duration: Duration,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep<'a>(
        &'a self,
        duration: Duration,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(tokio::time::sleep(duration))
    }
}
