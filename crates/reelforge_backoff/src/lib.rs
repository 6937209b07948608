//! Retry-with-exponential-backoff execution for fallible async operations.
//!
//! Any component that makes an external call wraps it in [`retry`]: transient
//! failures (as classified by the error's [`RetryableError`] impl) re-enter
//! an exponential schedule with additive jitter, permanent failures propagate
//! immediately, and exhausting the schedule propagates the last error. One
//! WARN run-log entry is emitted per retry with the computed delay.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelforge_backoff::{retry, BackoffPolicy};
//!
//! let policy = BackoffPolicy::default();
//! let text = retry(&policy, "chapter_planning", &log, || async {
//!     driver.generate(&request).await
//! })
//! .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod policy;
mod run;

pub use policy::{BackoffDelays, BackoffPolicy};
pub use run::retry;
