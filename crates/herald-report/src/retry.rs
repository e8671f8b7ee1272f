//! Bounded exponential-backoff retry for gateway deliveries.
//!
//! Schedule with the default 1 s base: 1 s, 2 s, 4 s, 8 s. Attempts are
//! strictly sequential and re-invoke the identical action; intermediate
//! failures are logged as warnings, only the final one is surfaced.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use herald_core::RetryConfig;

use crate::error::{GatewayError, ReportError};

/// Delivery retry policy: attempt budget plus backoff base.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt. An always-failing action runs
    /// `max_retries + 1` times in total.
    pub max_retries: u32,
    /// Backoff unit, doubled on every failed attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(cfg: &RetryConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            base_delay: Duration::from_secs(cfg.base_delay_secs),
        }
    }

    /// Backoff before retry `attempt` (0-indexed): `base * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Run `deliver` until it succeeds or the retry budget is exhausted.
///
/// Returns [`ReportError::DeliveryFailed`] carrying the last underlying
/// error once `max_retries + 1` attempts have failed, never before.
pub async fn deliver_with_retry<F, Fut>(policy: &RetryPolicy, mut deliver: F) -> Result<(), ReportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), GatewayError>>,
{
    for attempt in 0..=policy.max_retries {
        match deliver().await {
            Ok(()) => return Ok(()),
            Err(source) if attempt == policy.max_retries => {
                return Err(ReportError::DeliveryFailed {
                    attempts: attempt + 1,
                    source,
                });
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    max = policy.max_retries + 1,
                    error = %e,
                    retry_after_secs = delay.as_secs(),
                    "delivery failed, retrying with backoff"
                );
                sleep(delay).await;
            }
        }
    }

    // Unreachable — the loop always returns inside the match arms above.
    unreachable!("retry loop exited without returning")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(max_retries: u32, base_secs: u64) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_secs(base_secs),
        }
    }

    fn failing() -> Result<(), GatewayError> {
        Err(GatewayError::Transport("gateway down".into()))
    }

    #[tokio::test]
    async fn always_failing_action_runs_budget_plus_one_times() {
        let calls = AtomicU32::new(0);
        let result = deliver_with_retry(&policy(3, 0), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { failing() }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        match result {
            Err(ReportError::DeliveryFailed { attempts, .. }) => assert_eq!(attempts, 4),
            other => panic!("expected DeliveryFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_on_later_attempt_stops_retrying() {
        let calls = AtomicU32::new(0);
        let result = deliver_with_retry(&policy(3, 0), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    failing()
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn immediate_success_is_a_single_attempt() {
        let calls = AtomicU32::new(0);
        let result = deliver_with_retry(&policy(3, 0), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_budget_fails_after_one_attempt() {
        let calls = AtomicU32::new(0);
        let result = deliver_with_retry(&policy(0, 0), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { failing() }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            result,
            Err(ReportError::DeliveryFailed { attempts: 1, .. })
        ));
    }

    #[test]
    fn backoff_schedule_is_powers_of_two() {
        let p = policy(4, 1);
        assert_eq!(p.delay_for(0), Duration::from_secs(1));
        assert_eq!(p.delay_for(1), Duration::from_secs(2));
        assert_eq!(p.delay_for(2), Duration::from_secs(4));
        assert_eq!(p.delay_for(3), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn total_backoff_wait_is_the_sum_of_powers() {
        // max_retries = 3, base 1 s: waits of 1 + 2 + 4 = 7 s before the
        // final failing attempt.
        let start = tokio::time::Instant::now();
        let result = deliver_with_retry(&policy(3, 1), || async { failing() }).await;
        assert!(result.is_err());
        assert_eq!(start.elapsed(), Duration::from_secs(7));
    }
}
