//! Supporting types for the collaborator traits.

use reelforge_core::{ArtifactRef, ContinuationToken};
use reelforge_error::SynthesisErrorKind;
use serde::{Deserialize, Serialize};

/// One request to the video segment synthesis service.
///
/// The first call of a chain carries no seed; every later call seeds on the
/// continuation token of the previous segment to preserve visual continuity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    /// Textual prompt describing the segment
    pub prompt: String,
    /// Continuation token of the previous segment, absent on the first call
    pub seed: Option<ContinuationToken>,
    /// Output resolution, e.g. "1080p"
    pub resolution: String,
    /// Output aspect ratio, e.g. "16:9"
    pub aspect_ratio: String,
}

impl SynthesisRequest {
    /// Initial request of a chain, seeded only by the prompt.
    pub fn initial(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            seed: None,
            resolution: "1080p".to_string(),
            aspect_ratio: "16:9".to_string(),
        }
    }

    /// Extension request seeded by the previous segment's continuation token.
    pub fn extension(prompt: impl Into<String>, seed: ContinuationToken) -> Self {
        Self {
            seed: Some(seed),
            ..Self::initial(prompt)
        }
    }
}

/// Opaque handle to one in-flight synthesis operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationHandle(pub String);

impl OperationHandle {
    /// Wrap a backend operation identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Backend operation identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Snapshot of a polled synthesis operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisPoll {
    /// Still running; poll again after the fixed interval
    Pending,
    /// Finished successfully
    Complete(CompletedSegment),
    /// Finished with a terminal error
    Failed(SynthesisErrorKind),
}

/// The payload of a successfully completed synthesis operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSegment {
    /// Reference to the produced visual artifact
    pub artifact: ArtifactRef,
    /// Token usable as the seed for the next call in the chain; absent when
    /// the backend dropped the chain context
    pub continuation: Option<ContinuationToken>,
}
