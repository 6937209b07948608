//! Model fallback router error types.

use crate::RetryableError;

/// Specific error conditions for planning-model calls.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display, serde::Serialize,
)]
pub enum RouterErrorKind {
    /// Rate-limit or quota exhaustion signalled by the provider (429-class)
    #[display("Rate limited: {}", message)]
    RateLimited {
        /// Provider-reported detail
        message: String,
    },
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Provider returned no usable text
    #[display("Model returned an empty response")]
    EmptyResponse,
    /// API request failed for a non-HTTP reason
    #[display("Model API request failed: {}", _0)]
    ApiRequest(String),
    /// A single tier failed all of its backoff attempts
    #[display("Tier '{}' exhausted after {} attempts: {}", tier, attempts, message)]
    TierExhausted {
        /// Tier identifier
        tier: String,
        /// Attempts made against this tier
        attempts: usize,
        /// Last error observed on this tier
        message: String,
    },
    /// Every tier in the catalogue failed; carries one summary line per tier
    #[display("All {} model tiers exhausted: [{}]", failures.len(), failures.join("; "))]
    AllTiersExhausted {
        /// One failure summary per exhausted tier, most capable first
        failures: Vec<String>,
    },
    /// Tier catalogue is empty
    #[display("Model tier catalogue is empty")]
    EmptyCatalog,
}

impl RouterErrorKind {
    /// Check if this error type should be retried within the same tier.
    pub fn is_retryable(&self) -> bool {
        match self {
            RouterErrorKind::RateLimited { .. } => true,
            RouterErrorKind::Http { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            RouterErrorKind::RateLimited { .. } => (5000, 3, 40),
            RouterErrorKind::Http { status_code, .. } => match *status_code {
                429 => (5000, 3, 40),
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                408 => (2000, 4, 30),
                _ => (2000, 5, 60),
            },
            _ => (2000, 5, 60),
        }
    }
}

/// Router error with source location tracking.
///
/// # Examples
///
/// ```
/// use reelforge_error::{RouterError, RouterErrorKind};
///
/// let err = RouterError::new(RouterErrorKind::EmptyCatalog);
/// assert!(format!("{}", err).contains("catalogue"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Router Error: {} at line {} in {}", kind, line, file)]
pub struct RouterError {
    /// The kind of error that occurred
    pub kind: RouterErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RouterError {
    /// Create a new RouterError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RouterErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl RetryableError for RouterError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
