//! Retry classification for external-call errors.

/// Trait for errors that support retry logic.
///
/// This trait allows error types to specify whether they should trigger a
/// retry and what retry strategy parameters to use. Classification is typed:
/// an adapter that talks to an external service maps provider responses into
/// an error kind, and the retry layer asks the kind, never the message text.
///
/// # Examples
///
/// ```
/// use reelforge_error::{RetryableError, RouterError, RouterErrorKind};
///
/// let err = RouterError::new(RouterErrorKind::RateLimited {
///     message: "quota exceeded for minute window".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, max_delay) = err.retry_strategy_params();
/// assert_eq!(retries, 3); // rate limits retry few times, patiently
/// # let _ = (backoff, max_delay);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like rate-limit/quota exhaustion, service overload,
    /// or a seed artifact that has not finished indexing should return true.
    /// Permanent errors like a rejected request or a lost operation handle
    /// should return false.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    /// Default implementation returns standard parameters.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 5, 60)
    }
}
