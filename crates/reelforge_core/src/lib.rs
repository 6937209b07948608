//! Core data types for the Reelforge video generation pipeline.
//!
//! This crate provides the foundation data types used across all Reelforge
//! interfaces: the immutable run configuration, grounding records, planned
//! chapters, the append-only run log, progress updates, and the final
//! generation result.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chapter;
mod config;
mod facts;
mod grounding;
mod log;
mod media;
mod progress;
mod request;
mod result;
mod telemetry;

pub use chapter::{Chapter, ChapterStatus};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use facts::{GenerationGoal, GenerationGoalBuilder, ProductFacts, ProductFactsBuilder};
pub use grounding::GroundingRecord;
pub use log::{Artifact, LogEntry, PipelineStage, RunLog, Severity};
pub use media::{ArtifactRef, AudioClip, ContinuationToken};
pub use progress::ProgressUpdate;
pub use request::{ModelRequest, ModelRequestBuilder, ModelResponse};
pub use result::GenerationResult;
pub use telemetry::init_telemetry;
