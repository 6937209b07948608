//! Scripted mock backends for pipeline tests.
#![allow(dead_code)]

use async_trait::async_trait;
use reelforge_core::{ArtifactRef, AudioClip, ContinuationToken, ModelRequest, ModelResponse};
use reelforge_error::{
    ReelforgeResult, RouterError, RouterErrorKind, SpeechError, SynthesisError, SynthesisErrorKind,
};
use reelforge_interface::{
    CompletedSegment, OperationHandle, PlanningModel, SpeechSynthesizer, SynthesisPoll,
    SynthesisRequest, VideoSynthesizer,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted behavior for one model id.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    Success(String),
    Error(RouterErrorKind),
}

/// Planning-model mock with per-model scripted behaviors.
pub struct MockPlanner {
    behaviors: HashMap<String, MockBehavior>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockPlanner {
    pub fn new(behaviors: HashMap<String, MockBehavior>) -> Self {
        Self {
            behaviors,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every model succeeds with the same text.
    pub fn always(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(HashMap::from([
            ("t0".to_string(), MockBehavior::Success(text.clone())),
            ("t1".to_string(), MockBehavior::Success(text.clone())),
            ("t2".to_string(), MockBehavior::Success(text)),
        ]))
    }

    /// Every model fails with a permanent error.
    pub fn always_failing() -> Self {
        let err = || MockBehavior::Error(RouterErrorKind::ApiRequest("invalid request".to_string()));
        Self::new(HashMap::from([
            ("t0".to_string(), err()),
            ("t1".to_string(), err()),
            ("t2".to_string(), err()),
        ]))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanningModel for MockPlanner {
    async fn generate(&self, req: &ModelRequest) -> ReelforgeResult<ModelResponse> {
        let model = req.model.clone().unwrap_or_default();
        self.calls.lock().unwrap().push(model.clone());

        match self.behaviors.get(&model) {
            Some(MockBehavior::Success(text)) => Ok(ModelResponse::new(text.clone())),
            Some(MockBehavior::Error(kind)) => Err(RouterError::new(kind.clone()).into()),
            None => Err(RouterError::new(RouterErrorKind::ApiRequest(format!(
                "no scripted behavior for model '{model}'"
            )))
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Scripted outcome for one synthesis attempt, consumed in submission order.
#[derive(Debug, Clone)]
pub enum SegmentScript {
    /// Report `Pending` this many times, then complete
    Complete { pending_polls: usize },
    /// Complete, but with the continuation token missing from the payload
    CompleteWithoutToken,
    /// Submission succeeds, the operation terminates with this error
    Fail(SynthesisErrorKind),
    /// Submission itself errors
    SubmitError(SynthesisErrorKind),
}

/// Video synthesis mock.
///
/// Each `submit` consumes the next script entry; once the script drains,
/// every attempt completes immediately. Completed segment `n` yields artifact
/// `video://seg-n` and continuation token `tok-n`, so tests can assert that
/// seeds thread through the chain in order.
pub struct MockSynthesizer {
    script: Mutex<VecDeque<SegmentScript>>,
    outcomes: Mutex<HashMap<String, SegmentScript>>,
    polls: Mutex<HashMap<String, usize>>,
    requests: Mutex<Vec<SynthesisRequest>>,
    counter: AtomicUsize,
}

impl MockSynthesizer {
    pub fn scripted(script: Vec<SegmentScript>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            outcomes: Mutex::new(HashMap::new()),
            polls: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            counter: AtomicUsize::new(0),
        }
    }

    pub fn always_success() -> Self {
        Self::scripted(Vec::new())
    }

    /// Requests in submission order.
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSynthesizer for MockSynthesizer {
    async fn submit(&self, req: &SynthesisRequest) -> ReelforgeResult<OperationHandle> {
        self.requests.lock().unwrap().push(req.clone());

        let entry = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(SegmentScript::Complete { pending_polls: 0 });
        if let SegmentScript::SubmitError(kind) = entry {
            return Err(SynthesisError::new(kind).into());
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = OperationHandle::new(format!("op-{n}"));
        self.outcomes
            .lock()
            .unwrap()
            .insert(handle.0.clone(), entry);
        Ok(handle)
    }

    async fn poll(&self, handle: &OperationHandle) -> ReelforgeResult<SynthesisPoll> {
        let outcome = self
            .outcomes
            .lock()
            .unwrap()
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| {
                SynthesisError::new(SynthesisErrorKind::Transport(format!(
                    "unknown operation '{}'",
                    handle.as_str()
                )))
            })?;

        match outcome {
            SegmentScript::Complete { pending_polls } => {
                let mut polls = self.polls.lock().unwrap();
                let seen = polls.entry(handle.0.clone()).or_insert(0);
                if *seen < pending_polls {
                    *seen += 1;
                    return Ok(SynthesisPoll::Pending);
                }
                let n = handle.as_str().trim_start_matches("op-");
                Ok(SynthesisPoll::Complete(CompletedSegment {
                    artifact: ArtifactRef::video(format!("video://seg-{n}")),
                    continuation: Some(ContinuationToken::new(format!("tok-{n}"))),
                }))
            }
            SegmentScript::CompleteWithoutToken => {
                let n = handle.as_str().trim_start_matches("op-");
                Ok(SynthesisPoll::Complete(CompletedSegment {
                    artifact: ArtifactRef::video(format!("video://seg-{n}")),
                    continuation: None,
                }))
            }
            SegmentScript::Fail(kind) => Ok(SynthesisPoll::Failed(kind)),
            SegmentScript::SubmitError(_) => unreachable!("consumed at submit"),
        }
    }
}

/// Speech mock that either returns a fixed clip or always fails.
pub struct MockSpeech {
    pub fail: bool,
}

#[async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(&self, _text: &str) -> ReelforgeResult<AudioClip> {
        if self.fail {
            Err(SpeechError::new("voice model unavailable").into())
        } else {
            Ok(AudioClip::new(vec![0u8; 16], 24_000))
        }
    }
}
