//! The model fallback router.
//!
//! One router instance serves one pipeline run. The escalation cursor is
//! owned by the instance, so concurrent runs never contaminate each other's
//! tier position, and a fresh run always starts back at the most capable
//! tier.

use crate::{ModelTier, TierCatalog};
use reelforge_backoff::{BackoffPolicy, retry};
use reelforge_core::{
    Artifact, AudioClip, LogEntry, ModelRequest, PipelineStage, RunLog, Severity,
};
use reelforge_error::{ReelforgeResult, RetryableError, RouterError, RouterErrorKind};
use reelforge_interface::{PlanningModel, SpeechSynthesizer};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, instrument, warn};

/// Routes planning-model calls through the tier catalogue with escalation.
///
/// Each tier call is wrapped in the backoff executor; only when a tier's
/// schedule is exhausted does the cursor advance to the next tier. The cursor
/// is sticky: once escalated, later calls in the same run start at the tier
/// that last succeeded, and it never moves back toward a more capable tier.
pub struct FallbackRouter {
    catalog: TierCatalog,
    driver: Arc<dyn PlanningModel>,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    log: RunLog,
    policy: BackoffPolicy,
    cursor: AtomicUsize,
}

impl FallbackRouter {
    /// Create a router over the given catalogue and backends.
    pub fn new(
        catalog: TierCatalog,
        driver: Arc<dyn PlanningModel>,
        speech: Option<Arc<dyn SpeechSynthesizer>>,
        log: RunLog,
    ) -> Self {
        Self {
            catalog,
            driver,
            speech,
            log,
            policy: BackoffPolicy::default(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Replace the per-tier backoff policy.
    pub fn with_policy(mut self, policy: BackoffPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The tier the cursor currently points at, if the catalogue is non-empty.
    pub fn current_tier(&self) -> Option<&ModelTier> {
        if self.catalog.is_empty() {
            return None;
        }
        let index = self
            .cursor
            .load(Ordering::SeqCst)
            .min(self.catalog.len() - 1);
        self.catalog.get(index)
    }

    /// Execute one text-generation call, escalating through the catalogue.
    ///
    /// Starts at the cursor tier. A tier that exhausts its backoff schedule
    /// (or returns empty text) is logged at WARN and skipped for the rest of
    /// the run. When every remaining tier fails, the per-tier failure
    /// summaries are aggregated into
    /// [`RouterErrorKind::AllTiersExhausted`].
    #[instrument(skip(self, prompt))]
    pub async fn execute(&self, operation: &str, prompt: &str) -> ReelforgeResult<String> {
        if self.catalog.is_empty() {
            return Err(RouterError::new(RouterErrorKind::EmptyCatalog).into());
        }

        let stage = stage_for(operation);
        self.log.push(
            LogEntry::new(Severity::Debug, "router", format!("{operation}: prompt issued"))
                .with_artifact(Artifact::capture(stage, "prompt", prompt)),
        );

        let start = self.cursor.load(Ordering::SeqCst);
        let mut failures = Vec::new();

        for index in start..self.catalog.len() {
            let Some(tier) = self.catalog.get(index) else {
                break;
            };
            debug!(operation, tier = %tier.id, "attempting tier");

            let request = ModelRequest {
                prompt: prompt.to_string(),
                model: Some(tier.id.clone()),
                ..ModelRequest::default()
            };

            let outcome = retry(&self.policy, operation, &self.log, || async {
                self.driver.generate(&request).await
            })
            .await;

            match outcome {
                Ok(response) if response.text.trim().is_empty() => {
                    let summary = RouterErrorKind::TierExhausted {
                        tier: tier.id.clone(),
                        attempts: 1,
                        message: RouterErrorKind::EmptyResponse.to_string(),
                    };
                    warn!(operation, tier = %tier.id, "tier returned empty response, escalating");
                    self.log.push(
                        LogEntry::new(
                            Severity::Warn,
                            "router",
                            format!("{operation}: {summary}, escalating"),
                        )
                        .with_tier(tier.id.clone()),
                    );
                    failures.push(summary.to_string());
                    self.cursor.store(index + 1, Ordering::SeqCst);
                }
                Ok(response) => {
                    info!(operation, tier = %tier.id, "tier call succeeded");
                    self.log.push(
                        LogEntry::new(
                            Severity::Info,
                            "router",
                            format!("{operation}: succeeded on {}", tier.display_name),
                        )
                        .with_tier(tier.id.clone())
                        .with_artifact(Artifact::capture(stage, "response", &response.text)),
                    );
                    self.cursor.store(index, Ordering::SeqCst);
                    return Ok(response.text);
                }
                Err(err) => {
                    // A permanent error stops the backoff executor on its
                    // first attempt; only retryable errors see the schedule.
                    let attempts = if err.is_retryable() {
                        self.policy.max_attempts
                    } else {
                        1
                    };
                    let summary = RouterErrorKind::TierExhausted {
                        tier: tier.id.clone(),
                        attempts,
                        message: err.to_string(),
                    };
                    warn!(operation, tier = %tier.id, error = %err, "tier exhausted, escalating");
                    self.log.push(
                        LogEntry::new(
                            Severity::Warn,
                            "router",
                            format!("{operation}: {summary}, escalating"),
                        )
                        .with_tier(tier.id.clone()),
                    );
                    failures.push(summary.to_string());
                    self.cursor.store(index + 1, Ordering::SeqCst);
                }
            }
        }

        let err = RouterError::new(RouterErrorKind::AllTiersExhausted { failures });
        self.log
            .error("router", format!("{operation}: {err}"));
        Err(err.into())
    }

    /// Best-effort speech synthesis through the backoff executor.
    ///
    /// Narration audio never blocks a run: a missing backend or a failed
    /// call yields `None` and the pipeline continues without audio.
    #[instrument(skip(self, text))]
    pub async fn generate_speech(&self, text: &str) -> Option<AudioClip> {
        let speech = self.speech.as_ref()?;

        match retry(&self.policy, "narration", &self.log, || async {
            speech.synthesize(text).await
        })
        .await
        {
            Ok(clip) => Some(clip),
            Err(err) => {
                warn!(error = %err, "speech synthesis failed, continuing without audio");
                self.log
                    .warn("router", format!("speech synthesis failed: {err}"));
                None
            }
        }
    }
}

/// Stage tag for prompt/response artifact captures, keyed by operation name.
fn stage_for(operation: &str) -> PipelineStage {
    match operation {
        "forensic_analysis" => PipelineStage::Assembly,
        _ => PipelineStage::Planning,
    }
}
