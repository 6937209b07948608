//! The five-stage pipeline driver.

use crate::chain::{ChainTuning, SynthesisChain};
use crate::grounding::resolve_grounding;
use crate::mastering::master_audio;
use crate::planner::plan_chapters;
use chrono::Utc;
use reelforge_backoff::BackoffPolicy;
use reelforge_core::{
    GenerationResult, LogEntry, PipelineConfig, PipelineStage, ProgressUpdate, RunLog, Severity,
};
use reelforge_error::{ReelforgeError, ReelforgeResult};
use reelforge_interface::{PlanningModel, ProgressSink, SpeechSynthesizer, VideoSynthesizer};
use reelforge_models::{FallbackRouter, TierCatalog};
use std::sync::Arc;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Terminal failure of one run, carrying the full log trail for forensics.
#[derive(Debug)]
pub struct RunFailure {
    /// The error that ended the run
    pub error: ReelforgeError,
    /// Everything logged up to and including the failure
    pub log: Vec<LogEntry>,
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} log entries)", self.error, self.log.len())
    }
}

/// One pipeline run: grounding, planning, synthesis, mastering, assembly.
///
/// The fallback router (and its escalation cursor) is owned by the instance,
/// so construct one `Pipeline` per run; concurrent runs never contend on
/// tier state.
pub struct Pipeline {
    router: FallbackRouter,
    synthesizer: Arc<dyn VideoSynthesizer>,
    log: RunLog,
    tuning: ChainTuning,
}

impl Pipeline {
    /// Assemble a pipeline over the given backends.
    pub fn new(
        catalog: TierCatalog,
        driver: Arc<dyn PlanningModel>,
        synthesizer: Arc<dyn VideoSynthesizer>,
        speech: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        let log = RunLog::new();
        Self {
            router: FallbackRouter::new(catalog, driver, speech, log.clone()),
            synthesizer,
            log,
            tuning: ChainTuning::default(),
        }
    }

    /// Replace the backoff policy used for all routed calls.
    pub fn with_policy(mut self, policy: BackoffPolicy) -> Self {
        self.router = self.router.with_policy(policy);
        self
    }

    /// Replace the chain timing/ceiling knobs.
    pub fn with_tuning(mut self, tuning: ChainTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Run the pipeline to completion.
    ///
    /// The sink receives a synchronous [`ProgressUpdate`] at every stage
    /// milestone. Recoverable conditions are absorbed where they are
    /// detected; anything that makes forward progress impossible is logged
    /// once at ERROR and surfaced as a [`RunFailure`] with the accumulated
    /// log attached.
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        config: &PipelineConfig,
        sink: &dyn ProgressSink,
    ) -> Result<GenerationResult, RunFailure> {
        match self.execute(config, sink).await {
            Ok(result) => Ok(result),
            Err(error) => {
                error!(error = %error, "pipeline run failed");
                let entry = self
                    .log
                    .error("orchestrator", format!("run failed: {error}"));
                sink.on_progress(
                    &ProgressUpdate::new(PipelineStage::Assembly, "run failed", 100)
                        .with_log_entry(entry),
                );
                Err(RunFailure {
                    error,
                    log: self.log.snapshot(),
                })
            }
        }
    }

    async fn execute(
        &self,
        config: &PipelineConfig,
        sink: &dyn ProgressSink,
    ) -> ReelforgeResult<GenerationResult> {
        let run_id = Uuid::new_v4();
        info!(%run_id, product = %config.facts().name, "starting pipeline run");

        self.report(sink, PipelineStage::Grounding, "resolving grounding", 2);
        let grounding = resolve_grounding(config, &self.log);
        self.report(
            sink,
            PipelineStage::Grounding,
            format!("{} grounding records ready", grounding.len()),
            8,
        );

        self.report(sink, PipelineStage::Planning, "requesting chapter plan", 10);
        let mut chapters = plan_chapters(
            &self.router,
            config.facts(),
            config.goal(),
            &grounding,
            &self.log,
        )
        .await?;
        self.report(
            sink,
            PipelineStage::Planning,
            format!("{} chapters planned", chapters.len()),
            20,
        );

        self.report(sink, PipelineStage::Synthesis, "starting synthesis chain", 25);
        let target_secs = config.goal().target_seconds();
        let chain =
            SynthesisChain::new(self.synthesizer.as_ref(), &self.log).with_tuning(self.tuning.clone());
        let outcome = chain.run(&mut chapters, target_secs).await?;
        self.report(
            sink,
            PipelineStage::Synthesis,
            format!("{}s of footage synthesized", outcome.total_duration_secs),
            80,
        );

        self.report(sink, PipelineStage::Mastering, "mastering narration", 85);
        let (transcript, final_audio) = master_audio(
            &self.router,
            &chapters,
            outcome.total_duration_secs,
            target_secs,
            &self.log,
        )
        .await;

        self.report(sink, PipelineStage::Assembly, "assembling result", 95);
        let completed_tier = self
            .router
            .current_tier()
            .map(|tier| tier.id.clone())
            .unwrap_or_default();
        let result = GenerationResult {
            run_id,
            timestamp: Utc::now(),
            product_name: config.facts().name.clone(),
            chapters,
            final_video: outcome.artifact,
            final_audio,
            transcript,
            total_duration_secs: outcome.total_duration_secs,
            log: self.log.snapshot(),
            recoveries_applied: outcome.recoveries,
            completed_tier,
        };
        self.report(sink, PipelineStage::Assembly, "run complete", 100);
        Ok(result)
    }

    /// Summarize a run's log history for diagnostics.
    ///
    /// Best-effort: asks the planning model for a narrative; a deterministic
    /// summary stands in when every tier is exhausted.
    pub async fn forensic_analysis(&self, entries: &[LogEntry]) -> String {
        let errors = entries
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .count();
        let warnings = entries
            .iter()
            .filter(|e| e.severity == Severity::Warn)
            .count();

        let mut prompt = String::from(
            "Summarize what went wrong (or right) in this video generation run, \
             in plain language, for an operator:\n",
        );
        for entry in entries {
            prompt.push_str(&format!(
                "[{}] {}: {}\n",
                entry.severity, entry.component, entry.message
            ));
        }

        match self.router.execute("forensic_analysis", &prompt).await {
            Ok(text) => text,
            Err(_) => format!(
                "Run produced {} log entries ({} errors, {} warnings); model analysis unavailable.",
                entries.len(),
                errors,
                warnings
            ),
        }
    }

    fn report(
        &self,
        sink: &dyn ProgressSink,
        stage: PipelineStage,
        message: impl Into<String>,
        percent: u8,
    ) {
        let message = message.into();
        let entry = self.log.info("orchestrator", message.clone());
        sink.on_progress(&ProgressUpdate::new(stage, message, percent).with_log_entry(entry));
    }
}
