//! The Reelforge pipeline orchestration engine.
//!
//! Sequences slow and unreliable external calls (planning model, iterative
//! video segment synthesis, text-to-speech) into one long-running job with
//! bounded retries, model fallback, progress reporting, and partial-failure
//! recovery.
//!
//! The entry point is [`Pipeline::run`]; the hardest subsystem is the
//! [`SynthesisChain`], which drives context-chained segment generation until
//! an accumulated-duration target (or the safety cap) is reached.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod grounding;
mod mastering;
mod normalize;
mod orchestrator;
mod planner;

pub use chain::{ChainOutcome, ChainPhase, ChainTuning, SynthesisChain};
pub use grounding::resolve_grounding;
pub use mastering::{master_audio, narration_transcript};
pub use normalize::{normalize_payload, parse_json};
pub use orchestrator::{Pipeline, RunFailure};
pub use planner::{CONTAINER_KEYS, fallback_plan, plan_chapters};
