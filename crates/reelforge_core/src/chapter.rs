//! Planned narrative chapters.

use crate::ArtifactRef;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a planned chapter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChapterStatus {
    /// Planned, not yet synthesized
    Queued,
    /// Currently driving a synthesis call
    Processing,
    /// Synthesized into the continuous artifact
    Completed,
    /// A synthesis step against this chapter failed
    Failed,
}

/// A planned narrative unit.
///
/// Created in bulk by the chapter planner, mutated in place by the segment
/// synthesis chain as each unit's status changes, never deleted mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Zero-based sequence position
    pub position: usize,
    /// Chapter title
    pub title: String,
    /// Target duration in seconds
    pub target_secs: u32,
    /// Visual-intent description, grounded in one grounding record
    pub visual_intent: String,
    /// Narration script for this chapter
    pub narration: String,
    /// Lifecycle status
    pub status: ChapterStatus,
    /// Synthesis retries attributed to this chapter
    pub retry_count: u32,
    /// Produced visual artifact, once synthesized
    pub artifact: Option<ArtifactRef>,
}

impl Chapter {
    /// Create a freshly planned chapter in `Queued` state.
    pub fn planned(
        position: usize,
        title: impl Into<String>,
        target_secs: u32,
        visual_intent: impl Into<String>,
        narration: impl Into<String>,
    ) -> Self {
        Self {
            position,
            title: title.into(),
            target_secs,
            visual_intent: visual_intent.into(),
            narration: narration.into(),
            status: ChapterStatus::Queued,
            retry_count: 0,
            artifact: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planned_chapter_starts_queued() {
        let chapter = Chapter::planned(0, "Opening", 30, "dashboard pan", "Meet Orbit.");
        assert_eq!(chapter.status, ChapterStatus::Queued);
        assert_eq!(chapter.retry_count, 0);
        assert!(chapter.artifact.is_none());
    }

    #[test]
    fn status_display_is_screaming_snake() {
        assert_eq!(ChapterStatus::Queued.to_string(), "QUEUED");
        assert_eq!(ChapterStatus::Processing.to_string(), "PROCESSING");
    }
}
