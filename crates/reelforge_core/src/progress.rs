//! Progress reporting types.

use crate::{LogEntry, PipelineStage};
use serde::{Deserialize, Serialize};

/// One progress milestone, delivered synchronously to the progress sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Coarse stage tag
    pub stage: PipelineStage,
    /// Human-readable milestone message
    pub message: String,
    /// Completion estimate, 0-100
    pub percent: u8,
    /// New log entry accompanying this milestone, if any
    pub log_entry: Option<LogEntry>,
}

impl ProgressUpdate {
    /// Create an update, clamping the percent estimate to 100.
    pub fn new(stage: PipelineStage, message: impl Into<String>, percent: u8) -> Self {
        Self {
            stage,
            message: message.into(),
            percent: percent.min(100),
            log_entry: None,
        }
    }

    /// Attach the log entry emitted at this milestone.
    pub fn with_log_entry(mut self, entry: LogEntry) -> Self {
        self.log_entry = Some(entry);
        self
    }
}
