//! The segment synthesis chain.
//!
//! Drives iterative, context-chained video segment generation: the first
//! call is seeded only by a prompt, every later call is seeded by the
//! continuation token of the previous segment. The chain retains only the
//! latest token, so the dependency is strictly linear; there is no partial
//! salvage once continuation breaks.

use reelforge_core::{ArtifactRef, Chapter, ChapterStatus, ContinuationToken, RunLog};
use reelforge_error::{ReelforgeResult, SynthesisError, SynthesisErrorKind};
use reelforge_interface::{CompletedSegment, SynthesisPoll, SynthesisRequest, VideoSynthesizer};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Phase of the chain's global loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainPhase {
    /// First segment in flight; nothing can be extended yet
    Init,
    /// Extension loop running
    Extending,
    /// Accumulated duration reached the target
    TargetReached,
    /// Accumulated duration reached the absolute safety ceiling
    SafetyCapReached,
}

/// Timing and ceiling knobs for the chain loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainTuning {
    /// Fixed wait between completion polls
    pub poll_interval: Duration,
    /// Stabilization wait before each extension call
    pub stabilization_base: Duration,
    /// Upper bound of the adaptive stabilization wait
    pub stabilization_max: Duration,
    /// Absolute ceiling on accumulated duration in seconds
    pub safety_cap_secs: u32,
    /// Consecutive extension errors tolerated before the run is fatal
    pub error_streak_ceiling: u32,
}

impl Default for ChainTuning {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            stabilization_base: Duration::from_secs(8),
            stabilization_max: Duration::from_secs(64),
            safety_cap_secs: 1800,
            error_streak_ceiling: 4,
        }
    }
}

/// What a completed chain hands to mastering.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOutcome {
    /// The continuous visual artifact, as of the last successful call
    pub artifact: ArtifactRef,
    /// Accumulated footage in seconds
    pub total_duration_secs: u32,
    /// Count of extension errors absorbed without failing the run
    pub recoveries: u32,
    /// Terminal phase, either target or safety cap
    pub phase: ChainPhase,
}

/// The chain executor for one run.
pub struct SynthesisChain<'a> {
    synthesizer: &'a dyn VideoSynthesizer,
    log: &'a RunLog,
    tuning: ChainTuning,
}

impl<'a> SynthesisChain<'a> {
    /// Create a chain over the given synthesis backend.
    pub fn new(synthesizer: &'a dyn VideoSynthesizer, log: &'a RunLog) -> Self {
        Self {
            synthesizer,
            log,
            tuning: ChainTuning::default(),
        }
    }

    /// Replace the timing/ceiling knobs.
    pub fn with_tuning(mut self, tuning: ChainTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Run the chain until the target or the safety cap is reached.
    ///
    /// Chapter statuses and artifacts are updated in place as the loop
    /// cycles through them; chapters are never removed. An INIT failure, a
    /// consecutive-error streak above the ceiling, or a lost continuation
    /// token fail the run.
    #[instrument(skip(self, chapters))]
    pub async fn run(
        &self,
        chapters: &mut [Chapter],
        target_secs: u32,
    ) -> ReelforgeResult<ChainOutcome> {
        let Some(first) = chapters.first_mut() else {
            return Err(SynthesisError::new(SynthesisErrorKind::InitFailed(
                "no chapters planned".to_string(),
            ))
            .into());
        };

        // INIT: without a first segment nothing can be extended, so any
        // failure here is fatal.
        info!(chapter = %first.title, "submitting initial segment");
        self.log.info(
            "chain",
            format!("initial segment: \"{}\"", first.title),
        );
        first.status = ChapterStatus::Processing;

        let request = SynthesisRequest::initial(&first.visual_intent);
        let segment = match self.attempt(&request).await {
            Ok(segment) => segment,
            Err(err) => {
                error!(error = %err, "initial segment failed");
                self.log
                    .error("chain", format!("initial segment failed: {err}"));
                first.status = ChapterStatus::Failed;
                return Err(SynthesisError::new(SynthesisErrorKind::InitFailed(
                    err.to_string(),
                ))
                .into());
            }
        };

        let mut token: Option<ContinuationToken> = segment.continuation;
        let mut artifact = segment.artifact;
        let mut duration = self.synthesizer.initial_segment_secs();
        first.status = ChapterStatus::Completed;
        first.artifact = Some(artifact.clone());
        self.log.info(
            "chain",
            format!("initial segment complete, {duration}s accumulated"),
        );

        // EXTENDING: loop until target or safety cap. Each iteration either
        // grows the duration or grows the bounded error streak, so the loop
        // terminates for any input.
        let mut pointer = 1usize;
        let mut streak = 0u32;
        let mut recoveries = 0u32;
        let mut wait = self.tuning.stabilization_base;
        let extension_secs = self.synthesizer.extension_segment_secs();

        let phase = loop {
            if duration >= target_secs {
                break ChainPhase::TargetReached;
            }
            if duration >= self.tuning.safety_cap_secs {
                warn!(duration, "safety cap reached before target");
                self.log.warn(
                    "chain",
                    format!("safety cap reached at {duration}s, stopping"),
                );
                break ChainPhase::SafetyCapReached;
            }

            // The backend must finish indexing the previous artifact before
            // it can seed the next call.
            tokio::time::sleep(wait).await;

            let index = pointer % chapters.len();
            let chapter = &mut chapters[index];
            if chapter.status != ChapterStatus::Completed {
                chapter.status = ChapterStatus::Processing;
            }
            let prompt = format!(
                "Continue seamlessly into \"{}\": {}",
                chapter.title, chapter.visual_intent
            );
            debug!(chapter = %chapter.title, duration, "submitting extension");

            // The dependency is strictly linear: without the previous
            // segment's token there is nothing to extend from.
            let Some(seed) = token.clone() else {
                chapter.status = ChapterStatus::Failed;
                error!(duration, "continuation token lost, chain cannot extend");
                self.log.error(
                    "chain",
                    format!("continuation token lost at {duration}s, aborting"),
                );
                return Err(SynthesisError::new(SynthesisErrorKind::ContinuationLost).into());
            };

            let request = SynthesisRequest::extension(prompt, seed);
            match self.attempt(&request).await {
                Ok(segment) => {
                    token = segment.continuation;
                    artifact = segment.artifact;
                    duration += extension_secs;
                    chapter.status = ChapterStatus::Completed;
                    chapter.artifact = Some(artifact.clone());
                    pointer += 1;
                    streak = 0;
                    wait = self.tuning.stabilization_base;
                    self.log.info(
                        "chain",
                        format!("extension complete, {duration}s accumulated"),
                    );
                }
                Err(err) => {
                    streak += 1;
                    chapter.retry_count += 1;
                    if streak > self.tuning.error_streak_ceiling {
                        chapter.status = ChapterStatus::Failed;
                        error!(streak, "extension error streak exceeded ceiling");
                        self.log.error(
                            "chain",
                            format!("extension error streak exceeded ({err}), aborting"),
                        );
                        return Err(SynthesisError::new(
                            SynthesisErrorKind::ErrorStreakExceeded {
                                ceiling: self.tuning.error_streak_ceiling,
                            },
                        )
                        .into());
                    }
                    recoveries += 1;
                    wait = (wait * 2).min(self.tuning.stabilization_max);
                    if is_seed_not_ready(&err) {
                        warn!(streak, wait_secs = wait.as_secs(), "seed not ready, waiting longer");
                        self.log.warn(
                            "chain",
                            format!("seed not ready (streak {streak}), waiting {}s", wait.as_secs()),
                        );
                    } else {
                        error!(streak, error = %err, "extension failed, retrying step");
                        self.log.error(
                            "chain",
                            format!("extension failed ({err}), streak {streak}"),
                        );
                    }
                }
            }
        };

        info!(duration, recoveries, ?phase, "chain complete");
        Ok(ChainOutcome {
            artifact,
            total_duration_secs: duration,
            recoveries,
            phase,
        })
    }

    /// One submit/poll protocol round: `SUBMITTED → POLLING → {DONE | FAILED}`.
    async fn attempt(&self, request: &SynthesisRequest) -> ReelforgeResult<CompletedSegment> {
        let handle = self.synthesizer.submit(request).await?;
        loop {
            match self.synthesizer.poll(&handle).await? {
                SynthesisPoll::Pending => tokio::time::sleep(self.tuning.poll_interval).await,
                SynthesisPoll::Complete(segment) => return Ok(segment),
                SynthesisPoll::Failed(kind) => return Err(SynthesisError::new(kind).into()),
            }
        }
    }
}

fn is_seed_not_ready(err: &reelforge_error::ReelforgeError) -> bool {
    matches!(
        err.kind(),
        reelforge_error::ReelforgeErrorKind::Synthesis(SynthesisError {
            kind: SynthesisErrorKind::SeedNotReady(_),
            ..
        })
    )
}
