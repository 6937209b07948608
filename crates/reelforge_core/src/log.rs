//! The append-only run log.
//!
//! Tracing handles operator-facing diagnostics; the run log is different. Log
//! history is part of the product surface: it is attached to the final result
//! and to terminal failures, and it feeds the forensic-analysis entry point.
//! Entries are never mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Severity of a run log entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational milestone
    Info,
    /// Diagnostic detail
    Debug,
    /// Recovered or recoverable condition
    Warn,
    /// Forward progress threatened or lost
    Error,
}

/// Coarse pipeline stage, used for progress reporting and artifact tagging.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Grounding records produced or parsed
    Grounding,
    /// Chapter plan requested and normalized
    Planning,
    /// Segment synthesis chain running
    Synthesis,
    /// Narration concatenation and speech synthesis
    Mastering,
    /// Final result assembly
    Assembly,
}

/// A captured prompt or response, attached to a log entry for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Unique id of the capture
    pub id: Uuid,
    /// Stage active at capture time
    pub stage: PipelineStage,
    /// Payload type tag ("prompt", "response", ...)
    pub payload_type: String,
    /// The captured payload text
    pub payload: String,
    /// Capture time
    pub timestamp: DateTime<Utc>,
}

impl Artifact {
    /// Capture a payload under the given stage and type tag.
    pub fn capture(
        stage: PipelineStage,
        payload_type: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            stage,
            payload_type: payload_type.into(),
            payload: payload.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One observability record in the run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Emission time
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub severity: Severity,
    /// Free-text message
    pub message: String,
    /// Originating component name
    pub component: String,
    /// Model tier active at emission time, if any
    pub model_tier: Option<String>,
    /// Optional structured prompt/response capture
    pub artifact: Option<Artifact>,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(severity: Severity, component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            message: message.into(),
            component: component.into(),
            model_tier: None,
            artifact: None,
        }
    }

    /// Tag the entry with the active model tier.
    pub fn with_tier(mut self, tier: impl Into<String>) -> Self {
        self.model_tier = Some(tier.into());
        self
    }

    /// Attach a prompt/response capture.
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifact = Some(artifact);
        self
    }
}

/// Shared handle to the append-only log of one pipeline run.
///
/// Cheap to clone; every component of a run appends to the same underlying
/// list. Snapshots are taken for progress updates, the final result, and
/// failure forensics.
///
/// # Examples
///
/// ```
/// use reelforge_core::{RunLog, Severity};
///
/// let log = RunLog::new();
/// log.info("planner", "requesting chapter plan");
/// log.warn("router", "tier exhausted, escalating");
///
/// let entries = log.snapshot();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[1].severity, Severity::Warn);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl RunLog {
    /// Create an empty run log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prebuilt entry and return a copy of it.
    pub fn push(&self, entry: LogEntry) -> LogEntry {
        let mut entries = self.entries.lock().unwrap();
        entries.push(entry.clone());
        entry
    }

    /// Append an INFO entry.
    pub fn info(&self, component: &str, message: impl Into<String>) -> LogEntry {
        self.push(LogEntry::new(Severity::Info, component, message))
    }

    /// Append a DEBUG entry.
    pub fn debug(&self, component: &str, message: impl Into<String>) -> LogEntry {
        self.push(LogEntry::new(Severity::Debug, component, message))
    }

    /// Append a WARN entry.
    pub fn warn(&self, component: &str, message: impl Into<String>) -> LogEntry {
        self.push(LogEntry::new(Severity::Warn, component, message))
    }

    /// Append an ERROR entry.
    pub fn error(&self, component: &str, message: impl Into<String>) -> LogEntry {
        self.push(LogEntry::new(Severity::Error, component, message))
    }

    /// Copy of all entries appended so far.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of entries appended so far.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// True if nothing has been logged yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_log() {
        let log = RunLog::new();
        let other = log.clone();
        log.info("a", "one");
        other.error("b", "two");
        assert_eq!(log.snapshot().len(), 2);
    }

    #[test]
    fn entries_carry_tier_and_artifact() {
        let entry = LogEntry::new(Severity::Info, "router", "tier call succeeded")
            .with_tier("tier0-max")
            .with_artifact(Artifact::capture(PipelineStage::Planning, "prompt", "plan this"));
        assert_eq!(entry.model_tier.as_deref(), Some("tier0-max"));
        assert_eq!(entry.artifact.unwrap().payload_type, "prompt");
    }
}
