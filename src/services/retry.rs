//! Retry and timeout handling for record store calls

use std::{future::Future, time::Duration};

use tokio::time::{sleep, timeout};
use tracing::{debug, error, warn};

use crate::error::{StoreError, StoreResult};

/// How persistence calls are attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, at least one
    pub attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
    /// Upper bound for a single attempt
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration, timeout: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
            timeout,
        }
    }

    /// A single attempt, no delay
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO, Duration::from_secs(5))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(250), Duration::from_secs(5))
    }
}

/// Run `op` until it succeeds or the policy's attempts are used up
///
/// Every failed attempt is logged; the last error is returned.
pub async fn persist_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    action: &str,
    mut op: F,
) -> StoreResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = StoreResult<T>>,
{
    let mut last_error = StoreError::Unavailable(format!("{}: not attempted", action));

    for attempt in 1..=policy.attempts {
        debug!("Persisting {} (attempt {}/{})", action, attempt, policy.attempts);

        let result = match timeout(policy.timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(policy.timeout)),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!(
                    "Persisting {} failed (attempt {}/{}): {}",
                    action, attempt, policy.attempts, e
                );
                last_error = e;
            }
        }

        if attempt < policy.attempts && !policy.delay.is_zero() {
            sleep(policy.delay).await;
        }
    }

    error!("Giving up on {} after {} attempts: {}", action, policy.attempts, last_error);
    Err(last_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(3, Duration::ZERO, Duration::from_secs(1));

        let result = persist_with_retry(&policy, "test", move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(StoreError::Unavailable("flaky".to_string()))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_error_when_exhausted() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = RetryPolicy::new(2, Duration::ZERO, Duration::from_secs(1));

        let result: StoreResult<()> = persist_with_retry(&policy, "test", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Rejected("nope".to_string()))
        })
        .await;

        assert_eq!(result, Err(StoreError::Rejected("nope".to_string())));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let policy = RetryPolicy::new(1, Duration::ZERO, Duration::from_millis(100));

        let result: StoreResult<()> = persist_with_retry(&policy, "slow", || async {
            sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;

        assert_eq!(result, Err(StoreError::Timeout(Duration::from_millis(100))));
    }

    #[test]
    fn zero_attempts_becomes_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO, Duration::ZERO).attempts, 1);
    }
}
