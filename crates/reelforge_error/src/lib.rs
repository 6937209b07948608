//! Error types for the Reelforge video generation pipeline.
//!
//! This crate provides the foundation error types used throughout the
//! Reelforge workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Retry behavior is a property of the error, not of the caller: error kinds
//! that represent transient conditions implement [`RetryableError`], so retry
//! policy is decoupled from provider-specific message text.
//!
//! # Examples
//!
//! ```
//! use reelforge_error::{ReelforgeResult, RouterError, RouterErrorKind};
//!
//! fn call_model() -> ReelforgeResult<String> {
//!     Err(RouterError::new(RouterErrorKind::EmptyResponse))?
//! }
//!
//! match call_model() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod retry;
mod router;
mod speech;
mod synthesis;

pub use config::ConfigError;
pub use error::{ReelforgeError, ReelforgeErrorKind, ReelforgeResult};
pub use json::JsonError;
pub use retry::RetryableError;
pub use router::{RouterError, RouterErrorKind};
pub use speech::SpeechError;
pub use synthesis::{SynthesisError, SynthesisErrorKind};
