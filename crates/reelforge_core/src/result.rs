//! Final pipeline output.

use crate::{ArtifactRef, AudioClip, Chapter, LogEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The final output of a successful pipeline run.
///
/// Constructed once at completion; immutable thereafter. `total_duration_secs`
/// may be below the configured target when the chain was capped by the error
/// ceiling, and `final_audio` is `None` when speech synthesis failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Run identifier
    pub run_id: Uuid,
    /// Completion time
    pub timestamp: DateTime<Utc>,
    /// Product name the run was configured with
    pub product_name: String,
    /// Ordered chapters, carrying their final statuses
    pub chapters: Vec<Chapter>,
    /// The continuous visual artifact produced by the synthesis chain
    pub final_video: ArtifactRef,
    /// Mastered audio track, absent when speech synthesis failed
    pub final_audio: Option<AudioClip>,
    /// Concatenated narration transcript actually sent to mastering
    pub transcript: String,
    /// Total accumulated footage in seconds
    pub total_duration_secs: u32,
    /// Full run log
    pub log: Vec<LogEntry>,
    /// Count of recoveries absorbed during the run
    pub recoveries_applied: u32,
    /// Model tier active at completion
    pub completed_tier: String,
}
