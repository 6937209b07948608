//! Reelforge - Pipeline Orchestration Engine for generative video
//!
//! Reelforge turns a product description plus optional source recordings
//! into a long-form narrated video by sequencing slow and unreliable
//! external calls (planning model, iterative video segment synthesis,
//! text-to-speech) into a single long-running job with bounded retries,
//! model fallback, progress reporting, and partial-failure recovery.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use reelforge::{Pipeline, PipelineConfig, ProductFacts, GenerationGoal, TierCatalog};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::builder()
//!         .facts(ProductFacts::builder().name("Orbit CRM").build()?)
//!         .goal(
//!             GenerationGoal::builder()
//!                 .category("walkthrough")
//!                 .target_minutes(2u32)
//!                 .tone("plain")
//!                 .audience("buyers")
//!                 .build()?,
//!         )
//!         .build()?;
//!
//!     let pipeline = Pipeline::new(TierCatalog::load()?, planner, synthesizer, Some(speech));
//!     let result = pipeline
//!         .run(&config, &|update| println!("{}%: {}", update.percent, update.message))
//!         .await?;
//!     println!("produced {}s of video", result.total_duration_secs);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Reelforge is organized as a workspace with focused crates:
//!
//! - `reelforge_core` - Core data types (config, chapters, run log, result)
//! - `reelforge_error` - Error types and retry classification
//! - `reelforge_interface` - Collaborator traits for external services
//! - `reelforge_backoff` - Retry-with-exponential-backoff executor
//! - `reelforge_models` - Model tier catalogue and fallback router
//! - `reelforge_pipeline` - The orchestration engine itself
//!
//! This crate (`reelforge`) re-exports everything for convenience.

#![forbid(unsafe_code)]

pub use reelforge_backoff::*;
pub use reelforge_core::*;
pub use reelforge_error::*;
pub use reelforge_interface::*;
pub use reelforge_models::*;
pub use reelforge_pipeline::*;
