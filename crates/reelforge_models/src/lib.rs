//! Model tier catalogue, fallback router, and artifact retrieval.
//!
//! This crate decides *which* model answers a planning call. The tier
//! catalogue ranks models most capable first; the [`FallbackRouter`] walks it
//! with a sticky, run-scoped escalation cursor, wrapping every tier call in
//! the backoff executor. [`HttpArtifactStore`] fetches the bytes behind
//! artifact references produced by synthesis backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifacts;
mod router;
mod tiers;

pub use artifacts::HttpArtifactStore;
pub use router::FallbackRouter;
pub use tiers::{ModelTier, TierCatalog, TierRank};
