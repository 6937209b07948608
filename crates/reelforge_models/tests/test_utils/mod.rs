//! Scripted mock backends for router tests.

use async_trait::async_trait;
use reelforge_core::{AudioClip, ModelRequest, ModelResponse};
use reelforge_error::{ReelforgeResult, RouterError, RouterErrorKind, SpeechError};
use reelforge_interface::{PlanningModel, SpeechSynthesizer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted behavior for one model id.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeed with this text
    Success(String),
    /// Always fail with this error kind
    Error(RouterErrorKind),
    /// Fail `failures` times with `kind`, then succeed with `text`
    FailThenSucceed {
        failures: usize,
        kind: RouterErrorKind,
        text: String,
    },
}

/// Planning-model mock with per-model scripted behaviors.
///
/// Records the model id of every call so tests can assert on routing order.
pub struct MockPlanner {
    behaviors: HashMap<String, MockBehavior>,
    calls: Arc<Mutex<Vec<String>>>,
    counts: Mutex<HashMap<String, usize>>,
}

impl MockPlanner {
    pub fn new(behaviors: HashMap<String, MockBehavior>) -> Self {
        Self {
            behaviors,
            calls: Arc::new(Mutex::new(Vec::new())),
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Model ids in call order.
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
            Some(MockBehavior::FailThenSucceed {
                failures,
                kind,
                text,
            }) => {
                let mut counts = self.counts.lock().unwrap();
                let count = counts.entry(model).or_insert(0);
                *count += 1;
                if *count <= *failures {
                    Err(RouterError::new(kind.clone()).into())
                } else {
                    Ok(ModelResponse::new(text.clone()))
                }
            }
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
