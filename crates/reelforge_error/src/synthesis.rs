//! Video segment synthesis error types.

use crate::RetryableError;

/// Specific error conditions for segment synthesis operations.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display, serde::Serialize,
)]
pub enum SynthesisErrorKind {
    /// The seed artifact has not finished indexing on the backend yet.
    ///
    /// Recoverable: the same extension step is retried after a longer
    /// stabilization wait.
    #[display("Seed artifact not yet processed: {}", _0)]
    SeedNotReady(String),
    /// Rate-limit or quota exhaustion from the synthesis service
    #[display("Synthesis rate limited: {}", _0)]
    RateLimited(String),
    /// The operation completed with a terminal error
    #[display("Synthesis operation failed: {}", _0)]
    OperationFailed(String),
    /// The initial segment call failed; nothing can be extended
    #[display("Initial segment synthesis failed: {}", _0)]
    InitFailed(String),
    /// A completed operation carried no continuation token
    #[display("Continuation token missing from completed operation")]
    ContinuationLost,
    /// Too many consecutive extension errors; backend is desynchronized
    #[display("Extension error streak exceeded ceiling of {}", ceiling)]
    ErrorStreakExceeded {
        /// The configured consecutive-error ceiling
        ceiling: u32,
    },
    /// Submission or poll transport failure
    #[display("Synthesis transport error: {}", _0)]
    Transport(String),
}

impl SynthesisErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SynthesisErrorKind::SeedNotReady(_)
                | SynthesisErrorKind::RateLimited(_)
                | SynthesisErrorKind::Transport(_)
        )
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            // Indexing latency is measured in tens of seconds, so wait longer
            SynthesisErrorKind::SeedNotReady(_) => (15_000, 4, 120),
            SynthesisErrorKind::RateLimited(_) => (5000, 3, 40),
            SynthesisErrorKind::Transport(_) => (2000, 5, 60),
            _ => (2000, 5, 60),
        }
    }
}

/// Synthesis error with source location tracking.
///
/// # Examples
///
/// ```
/// use reelforge_error::{SynthesisError, SynthesisErrorKind, RetryableError};
///
/// let err = SynthesisError::new(SynthesisErrorKind::SeedNotReady(
///     "artifact is still being processed".to_string(),
/// ));
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Synthesis Error: {} at line {} in {}", kind, line, file)]
pub struct SynthesisError {
    /// The kind of error that occurred
    pub kind: SynthesisErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SynthesisError {
    /// Create a new SynthesisError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SynthesisErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for SynthesisError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
