//! Retry with exponential backoff
//!
//! A small policy wrapper used around rate-limited external calls.
//! Only errors classified as retryable are retried; after the attempt
//! budget is spent the last error is returned and callers decide
//! whether to surface it or fall back to a canned answer.

use crate::error::{Error, Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub base_delay: Duration,
    /// Backoff multiplier per attempt
    pub multiplier: f64,
    /// Ceiling on any single delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            multiplier: 2.0,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Delay to wait after the given failed attempt (1-based).
    ///
    /// Attempt 1 waits `base_delay`, attempt 2 double that, and so on,
    /// capped at `max_delay`. Attempt 0 never waits.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let millis =
            self.base_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32 - 1);
        let millis = millis.min(self.max_delay.as_millis() as f64) as u64;
        Duration::from_millis(millis)
    }

    /// Small random jitter so concurrent callers do not thunder in step
    fn jitter(&self) -> Duration {
        Duration::from_millis(rand::thread_rng().gen_range(0..100))
    }
}

/// Run an async operation under the retry policy.
///
/// `op` is called up to `max_attempts` times. Non-retryable errors
/// abort immediately.
pub async fn retry_async<T, F, Fut>(config: &RetryConfig, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;

    for attempt in 1..=config.max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                if attempt < config.max_attempts {
                    let delay = config.delay_for_attempt(attempt) + config.jitter();
                    warn!(
                        attempt,
                        max_attempts = config.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "transient failure, backing off"
                    );
                    sleep(delay).await;
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(Error::Config {
        message: "retry invoked with zero attempts".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn delay_schedule_doubles_from_base() {
        let config = RetryConfig::default();
        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(8));
    }

    #[test]
    fn delay_is_capped() {
        let config = RetryConfig {
            max_attempts: 10,
            base_delay: Duration::from_secs(2),
            multiplier: 2.0,
            max_delay: Duration::from_secs(5),
        };
        assert_eq!(config.delay_for_attempt(4), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn stops_after_attempt_budget() {
        let calls = AtomicU32::new(0);
        let config = RetryConfig {
            base_delay: Duration::from_millis(1),
            ..RetryConfig::default()
        };

        let result: Result<()> = retry_async(&config, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(Error::RateLimited {
                    message: "slow down".into(),
                })
            }
        })
        .await;

        assert!(matches!(result, Err(Error::RateLimited { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_retryable_errors_abort_immediately() {
        let calls = AtomicU32::new(0);
        let config = RetryConfig::default();

        let result: Result<()> = retry_async(&config, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(Error::ModelNotFound {
                    model: "llama3.2".into(),
                })
            }
        })
        .await;

        assert!(matches!(result, Err(Error::ModelNotFound { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_short_circuits() {
        let calls = AtomicU32::new(0);
        let config = RetryConfig::default();

        let result = retry_async(&config, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;

        assert_eq!(result.ok(), Some(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
