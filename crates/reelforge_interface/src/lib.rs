//! Trait definitions for the Reelforge video generation pipeline.
//!
//! This crate defines the seams between the pipeline engine and its external
//! collaborators: the planning model, the asynchronous video segment
//! synthesizer, the speech synthesizer, artifact storage, and the progress
//! sink the surrounding application listens on. The engine depends only on
//! these traits; concrete adapters live with the embedding application.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ArtifactStore, PlanningModel, ProgressSink, SpeechSynthesizer, VideoSynthesizer};
pub use types::{CompletedSegment, OperationHandle, SynthesisPoll, SynthesisRequest};
