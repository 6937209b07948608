//! Speech synthesis error types.

/// Speech synthesis error with source location.
///
/// Speech failures are always absorbed at the mastering boundary (a run that
/// produced video completes without audio), so this type carries no kind
/// discrimination beyond the message.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speech Error: {} at line {} in {}", message, line, file)]
pub struct SpeechError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl SpeechError {
    /// Create a new SpeechError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
