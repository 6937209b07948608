//! Top-level error wrapper types.

use crate::{
    ConfigError, JsonError, RetryableError, RouterError, SpeechError, SynthesisError,
};

/// The foundation error enum for the Reelforge workspace.
///
/// # Examples
///
/// ```
/// use reelforge_error::{ReelforgeError, JsonError};
///
/// let json_err = JsonError::new("trailing comma");
/// let err: ReelforgeError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelforgeErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Model fallback router error
    #[from(RouterError)]
    Router(RouterError),
    /// Video segment synthesis error
    #[from(SynthesisError)]
    Synthesis(SynthesisError),
    /// Speech synthesis error
    #[from(SpeechError)]
    Speech(SpeechError),
}

impl RetryableError for ReelforgeErrorKind {
    fn is_retryable(&self) -> bool {
        match self {
            ReelforgeErrorKind::Router(e) => e.is_retryable(),
            ReelforgeErrorKind::Synthesis(e) => e.is_retryable(),
            _ => false,
        }
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            ReelforgeErrorKind::Router(e) => e.retry_strategy_params(),
            ReelforgeErrorKind::Synthesis(e) => e.retry_strategy_params(),
            _ => (2000, 5, 60),
        }
    }
}

/// Reelforge error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reelforge_error::{ReelforgeResult, ConfigError};
///
/// fn might_fail() -> ReelforgeResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelforge Error: {}", _0)]
pub struct ReelforgeError(Box<ReelforgeErrorKind>);

impl ReelforgeError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelforgeErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelforgeErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ReelforgeErrorKind
impl<T> From<T> for ReelforgeError
where
    T: Into<ReelforgeErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

impl RetryableError for ReelforgeError {
    fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind().retry_strategy_params()
    }
}

/// Result type for Reelforge operations.
///
/// # Examples
///
/// ```
/// use reelforge_error::{ReelforgeResult, SpeechError};
///
/// fn synthesize() -> ReelforgeResult<Vec<u8>> {
///     Err(SpeechError::new("voice model unavailable"))?
/// }
/// ```
pub type ReelforgeResult<T> = std::result::Result<T, ReelforgeError>;
