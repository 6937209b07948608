//! Backoff schedule computation.

use rand::Rng;
use reelforge_error::RetryableError;
use std::time::Duration;

/// Parameters of one exponential backoff schedule.
///
/// Attempt *i* (zero-based) sleeps `initial_delay * 2^i` plus a uniformly
/// sampled jitter in `[0, max_jitter]`, with the base capped at `max_delay`.
/// `max_attempts` counts total attempts, so a policy with five attempts
/// sleeps at most four times.
///
/// # Examples
///
/// ```
/// use reelforge_backoff::BackoffPolicy;
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::default();
/// assert_eq!(policy.base_delay(0), Duration::from_millis(500));
/// assert_eq!(policy.base_delay(2), Duration::from_millis(2000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Total attempts, including the first
    pub max_attempts: usize,
    /// Upper bound of the additive jitter
    pub max_jitter: Duration,
    /// Cap on the exponential base delay
    pub max_delay: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_attempts: 5,
            max_jitter: Duration::from_millis(250),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl BackoffPolicy {
    /// Build a policy from `(initial_backoff_ms, max_retries, max_delay_secs)`
    /// as reported by [`RetryableError::retry_strategy_params`].
    ///
    /// [`RetryableError::retry_strategy_params`]:
    /// reelforge_error::RetryableError::retry_strategy_params
    pub fn from_params(params: (u64, usize, u64)) -> Self {
        let (initial_ms, max_retries, max_delay_secs) = params;
        Self {
            initial_delay: Duration::from_millis(initial_ms),
            max_attempts: max_retries + 1,
            max_delay: Duration::from_secs(max_delay_secs),
            ..Self::default()
        }
    }

    /// Build a policy from the strategy parameters an error advertises.
    pub fn for_error<E: RetryableError>(err: &E) -> Self {
        Self::from_params(err.retry_strategy_params())
    }

    /// The exponential base delay for a zero-based attempt index, capped at
    /// `max_delay`. Jitter is not included.
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    /// Iterator over the jittered sleep durations of this schedule.
    ///
    /// Yields `max_attempts - 1` items: there is no sleep after the last
    /// attempt.
    pub fn delays(&self) -> BackoffDelays {
        BackoffDelays {
            policy: self.clone(),
            attempt: 0,
        }
    }
}

/// Iterator over the jittered delays of a [`BackoffPolicy`].
#[derive(Debug, Clone)]
pub struct BackoffDelays {
    policy: BackoffPolicy,
    attempt: u32,
}

impl Iterator for BackoffDelays {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if (self.attempt as usize) + 1 >= self.policy.max_attempts {
            return None;
        }
        let base = self.policy.base_delay(self.attempt);
        self.attempt += 1;
        let jitter_ms = self.policy.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::rng().random_range(0..=jitter_ms))
        };
        Some(base + jitter)
    }
}
