//! The retry driver.

use crate::BackoffPolicy;
use reelforge_core::RunLog;
use reelforge_error::RetryableError;
use std::fmt::Display;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_retry2::{Retry, RetryError};
use tracing::warn;

/// Run a fallible async operation under the given backoff policy.
///
/// The operation is attempted up to `policy.max_attempts` times. Errors whose
/// [`RetryableError::is_retryable`] returns true re-enter the schedule; all
/// others propagate immediately. Exhausting the schedule propagates the last
/// error. Every retry appends one WARN entry to the run log naming the
/// operation, the attempt number, and the computed delay.
pub async fn retry<T, E, F, Fut>(
    policy: &BackoffPolicy,
    operation: &str,
    log: &RunLog,
    mut op: F,
) -> Result<T, E>
where
    E: RetryableError + Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    // Compute the schedule up front so each WARN can report the exact delay
    // the driver is about to sleep.
    let schedule: Vec<std::time::Duration> = policy.delays().collect();
    let attempt = AtomicUsize::new(0);

    Retry::spawn(schedule.clone().into_iter(), || {
        let attempt = &attempt;
        let schedule = &schedule;
        let fut = op();
        async move {
            let current = attempt.fetch_add(1, Ordering::SeqCst);
            match fut.await {
                Ok(value) => Ok(value),
                Err(err) if err.is_retryable() && current < schedule.len() => {
                    let delay_ms = schedule[current].as_millis();
                    warn!(
                        operation,
                        attempt = current + 1,
                        delay_ms = delay_ms as u64,
                        error = %err,
                        "transient failure, backing off"
                    );
                    log.warn(
                        "backoff",
                        format!(
                            "{operation}: attempt {} failed ({err}), retrying in {delay_ms}ms",
                            current + 1
                        ),
                    );
                    Err(RetryError::Transient {
                        err,
                        retry_after: None,
                    })
                }
                Err(err) => Err(RetryError::Permanent(err)),
            }
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelforge_core::Severity;
    use reelforge_error::{RouterError, RouterErrorKind};
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::time::Duration;

    fn fast_policy(max_attempts: usize) -> BackoffPolicy {
        BackoffPolicy {
            initial_delay: Duration::from_millis(1),
            max_attempts,
            max_jitter: Duration::from_millis(1),
            max_delay: Duration::from_millis(10),
        }
    }

    fn rate_limited() -> RouterError {
        RouterError::new(RouterErrorKind::RateLimited {
            message: "quota exceeded".to_string(),
        })
    }

    fn permanent() -> RouterError {
        RouterError::new(RouterErrorKind::ApiRequest("malformed request".to_string()))
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let log = RunLog::new();
        let calls = Arc::new(Mutex::new(0usize));
        let result: Result<&str, RouterError> =
            retry(&fast_policy(5), "chapter_planning", &log, || {
                let calls = Arc::clone(&calls);
                async move {
                    let mut count = calls.lock().unwrap();
                    *count += 1;
                    if *count < 3 {
                        Err(rate_limited())
                    } else {
                        Ok("plan")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "plan");
        assert_eq!(*calls.lock().unwrap(), 3);
        let warns: Vec<_> = log
            .snapshot()
            .into_iter()
            .filter(|e| e.severity == Severity::Warn)
            .collect();
        assert_eq!(warns.len(), 2);
        assert!(warns[0].message.contains("chapter_planning"));
    }

    #[tokio::test]
    async fn permanent_error_propagates_without_retry() {
        let log = RunLog::new();
        let calls = Arc::new(Mutex::new(0usize));
        let result: Result<(), RouterError> =
            retry(&fast_policy(5), "chapter_planning", &log, || {
                let calls = Arc::clone(&calls);
                async move {
                    *calls.lock().unwrap() += 1;
                    Err(permanent())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(*calls.lock().unwrap(), 1);
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn exhaustion_returns_last_error() {
        let log = RunLog::new();
        let calls = Arc::new(Mutex::new(0usize));
        let result: Result<(), RouterError> =
            retry(&fast_policy(3), "video_synthesis", &log, || {
                let calls = Arc::clone(&calls);
                async move {
                    *calls.lock().unwrap() += 1;
                    Err(rate_limited())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(*calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn single_attempt_policy_never_retries() {
        let log = RunLog::new();
        let calls = Arc::new(Mutex::new(0usize));
        let result: Result<(), RouterError> = retry(&fast_policy(1), "narration", &log, || {
            let calls = Arc::clone(&calls);
            async move {
                *calls.lock().unwrap() += 1;
                Err(rate_limited())
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
