//! Bounded retry with exponential backoff.
//!
//! General-purpose: any async operation returning `Result<T, GenError>` can
//! be wrapped. Network failures, extraction failures, and schema-validation
//! failures all look the same from here; each one spends one attempt.

use crate::error::GenError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Exponential backoff configuration.
///
/// Delays are deterministic (`base * factor^attempt`), so with defaults the
/// waits between attempts are 1s and 2s.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BackoffConfig {
    pub base_ms: u64,
    pub factor: f64,
    pub max_attempts: usize,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base_ms: 1000,
            factor: 2.0,
            max_attempts: 3,
        }
    }
}

impl BackoffConfig {
    /// Delay before the retry that follows the zero-based `attempt`.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let ms = self.base_ms as f64 * self.factor.powi(attempt as i32);
        Duration::from_millis(ms as u64)
    }
}

/// Run `op` up to `config.max_attempts` times, sleeping between attempts.
///
/// `op` receives the zero-based attempt number. The first success is
/// returned immediately with no further attempts; once the budget is spent
/// the last failure is wrapped in [`GenError::Exhausted`]. The waits are
/// non-blocking `tokio::time::sleep` calls, so the caller's scheduler keeps
/// running during backoff.
pub async fn retry_with_backoff<T, F, Fut>(config: &BackoffConfig, mut op: F) -> Result<T, GenError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<T, GenError>>,
{
    let mut last_error = GenError::Exhausted {
        message: "no attempts were permitted".to_string(),
    };

    for attempt in 0..config.max_attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!(
                    "attempt {}/{} failed: {}",
                    attempt + 1,
                    config.max_attempts,
                    e
                );
                last_error = e;
            }
        }

        // Backoff before retry (not after the final attempt)
        if attempt + 1 < config.max_attempts {
            let delay = config.delay_for(attempt);
            debug!("backing off for {:?} before retry", delay);
            sleep(delay).await;
        }
    }

    Err(GenError::Exhausted {
        message: last_error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn delays_double_per_attempt() {
        let config = BackoffConfig::default();
        assert_eq!(config.delay_for(0), Duration::from_millis(1000));
        assert_eq!(config.delay_for(1), Duration::from_millis(2000));
        assert_eq!(config.delay_for(2), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_returns_without_sleeping() {
        let started = tokio::time::Instant::now();
        let result = retry_with_backoff(&BackoffConfig::default(), |_| async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn two_failures_then_success_waits_base_then_double() {
        let calls = AtomicUsize::new(0);
        let started = tokio::time::Instant::now();

        let result = retry_with_backoff(&BackoffConfig::default(), |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(GenError::Transport("endpoint down".into()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1000ms after the first failure, 2000ms after the second.
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_carries_last_failure_and_stops() {
        let calls = AtomicUsize::new(0);

        let result: Result<(), _> = retry_with_backoff(&BackoffConfig::default(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(GenError::SchemaValidation("bad shape".into())) }
        })
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.code(), "GENERATION_EXHAUSTED");
        assert!(err.to_string().contains("bad shape"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn attempt_numbers_are_zero_based() {
        let mut seen = Vec::new();
        let result: Result<(), _> = retry_with_backoff(
            &BackoffConfig {
                max_attempts: 2,
                ..BackoffConfig::default()
            },
            |attempt| {
                seen.push(attempt);
                async { Err(GenError::Transport("down".into())) }
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(seen, vec![0, 1]);
    }
}
