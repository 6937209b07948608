//! Collaborator traits for the pipeline engine.

use crate::{OperationHandle, SynthesisPoll, SynthesisRequest};
use async_trait::async_trait;
use reelforge_core::{ArtifactRef, AudioClip, ModelRequest, ModelResponse, ProgressUpdate};
use reelforge_error::ReelforgeResult;

/// A text-generation model backend.
///
/// Implementations map the generic request onto one provider; the fallback
/// router selects the concrete model per call via `ModelRequest.model`.
#[async_trait]
pub trait PlanningModel: Send + Sync {
    /// Generate model output for the given request.
    async fn generate(&self, req: &ModelRequest) -> ReelforgeResult<ModelResponse>;

    /// Provider name (e.g. "gemini", "anthropic").
    fn provider_name(&self) -> &'static str;
}

/// The asynchronous video segment synthesis service.
///
/// Submission returns an operation handle; completion is observed by polling.
/// Errors surfaced through [`SynthesisPoll::Failed`] are typed
/// (`SynthesisErrorKind`), so the chain's retry policy never inspects
/// provider message text.
#[async_trait]
pub trait VideoSynthesizer: Send + Sync {
    /// Submit one generation call, optionally seeded by a continuation token.
    async fn submit(&self, req: &SynthesisRequest) -> ReelforgeResult<OperationHandle>;

    /// Check an operation for completion.
    async fn poll(&self, handle: &OperationHandle) -> ReelforgeResult<SynthesisPoll>;

    /// Seconds of footage one initial call produces.
    fn initial_segment_secs(&self) -> u32 {
        5
    }

    /// Seconds of footage one extension call appends.
    fn extension_segment_secs(&self) -> u32 {
        7
    }
}

/// The speech synthesis service.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize narration audio for the given text.
    async fn synthesize(&self, text: &str) -> ReelforgeResult<AudioClip>;

    /// Sample rate of the returned PCM in Hz.
    fn sample_rate(&self) -> u32 {
        24_000
    }
}

/// Byte retrieval for produced artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Fetch the bytes behind an artifact reference.
    async fn fetch(&self, artifact: &ArtifactRef) -> ReelforgeResult<Vec<u8>>;
}

/// Consumer of progress milestones.
///
/// Invoked synchronously at every stage transition. Closures implement this
/// trait directly:
///
/// ```
/// use reelforge_interface::ProgressSink;
/// use reelforge_core::{PipelineStage, ProgressUpdate};
///
/// let sink = |update: &ProgressUpdate| println!("{}%: {}", update.percent, update.message);
/// sink.on_progress(&ProgressUpdate::new(PipelineStage::Planning, "planning", 10));
/// ```
pub trait ProgressSink: Send + Sync {
    /// Receive one milestone.
    fn on_progress(&self, update: &ProgressUpdate);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressUpdate) + Send + Sync,
{
    fn on_progress(&self, update: &ProgressUpdate) {
        self(update)
    }
}
