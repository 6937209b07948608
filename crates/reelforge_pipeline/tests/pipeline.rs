//! End-to-end pipeline scenarios.

mod test_utils;

use reelforge_backoff::BackoffPolicy;
use reelforge_core::{
    GenerationGoal, PipelineConfig, PipelineStage, ProductFacts, ProgressUpdate, Severity,
};
use reelforge_error::{ReelforgeErrorKind, RouterErrorKind};
use reelforge_models::{ModelTier, TierCatalog, TierRank};
use reelforge_pipeline::{ChainTuning, Pipeline};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_utils::{MockPlanner, MockSpeech, MockSynthesizer};

fn catalog() -> TierCatalog {
    TierCatalog {
        tiers: ["t0", "t1", "t2"]
            .iter()
            .enumerate()
            .map(|(rank, id)| ModelTier {
                id: id.to_string(),
                display_name: id.to_string(),
                rank: TierRank(rank as u8),
                context_tokens: 1_000_000,
                provider: "mock".to_string(),
            })
            .collect(),
    }
}

fn config(recordings: usize) -> PipelineConfig {
    PipelineConfig::builder()
        .facts(
            ProductFacts::builder()
                .name("Orbit CRM")
                .users("small sales teams")
                .problem("scattered pipeline data")
                .build()
                .unwrap(),
        )
        .goal(
            GenerationGoal::builder()
                .category("walkthrough")
                .target_minutes(1u32)
                .tone("plain")
                .audience("buyers")
                .build()
                .unwrap(),
        )
        .recording_ids(
            (0..recordings)
                .map(|i| format!("rec-{i:03}"))
                .collect::<Vec<_>>(),
        )
        .build()
        .unwrap()
}

fn pipeline(planner: MockPlanner, synth: MockSynthesizer, speech: MockSpeech) -> Pipeline {
    Pipeline::new(
        catalog(),
        Arc::new(planner),
        Arc::new(synth),
        Some(Arc::new(speech)),
    )
    .with_policy(BackoffPolicy {
        initial_delay: Duration::from_millis(1),
        max_attempts: 2,
        max_jitter: Duration::from_millis(1),
        max_delay: Duration::from_millis(10),
    })
    .with_tuning(ChainTuning {
        poll_interval: Duration::from_millis(1),
        stabilization_base: Duration::from_millis(1),
        stabilization_max: Duration::from_millis(4),
        ..ChainTuning::default()
    })
}

fn collecting_sink() -> (
    Arc<Mutex<Vec<ProgressUpdate>>>,
    impl Fn(&ProgressUpdate) + Send + Sync,
) {
    let updates = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&updates);
    (updates, move |update: &ProgressUpdate| {
        captured.lock().unwrap().push(update.clone())
    })
}

const PLAN: &str = r#"```json
[
  {"title": "Opening", "narration": "Meet Orbit CRM."},
  {"title": "Workflow", "narration": "Track every deal."},
  {"title": "Closing", "narration": "Start today."}
]
```"#;

#[tokio::test]
async fn scenario_a_full_run_reaches_target_duration() {
    let (updates, sink) = collecting_sink();
    let pipeline = pipeline(
        MockPlanner::always(PLAN),
        MockSynthesizer::always_success(),
        MockSpeech { fail: false },
    );

    let result = pipeline.run(&config(3), &sink).await.unwrap();

    assert_eq!(result.chapters.len(), 3);
    assert!(result.total_duration_secs >= 60);
    assert!(result.final_video.uri.starts_with("video://"));
    assert!(result.final_audio.is_some());
    assert_eq!(result.transcript, "Meet Orbit CRM. Track every deal. Start today.");
    assert_eq!(result.completed_tier, "t0");
    assert_eq!(result.recoveries_applied, 0);

    // Progress runs from grounding to assembly with non-decreasing percents.
    let updates = updates.lock().unwrap();
    assert_eq!(updates.first().unwrap().stage, PipelineStage::Grounding);
    let last = updates.last().unwrap();
    assert_eq!(last.stage, PipelineStage::Assembly);
    assert_eq!(last.percent, 100);
    assert!(updates.windows(2).all(|w| w[0].percent <= w[1].percent));
}

#[tokio::test]
async fn scenario_b_unparsable_plan_degrades_to_fallback_chapter() {
    let (_, sink) = collecting_sink();
    let pipeline = pipeline(
        MockPlanner::always("I'm sorry, I can't produce structured output today."),
        MockSynthesizer::always_success(),
        MockSpeech { fail: false },
    );

    let result = pipeline.run(&config(3), &sink).await.unwrap();

    assert_eq!(result.chapters.len(), 1);
    assert_eq!(result.chapters[0].title, "Introducing Orbit CRM");
    assert!(result.total_duration_secs >= 60);
}

#[tokio::test]
async fn scenario_c_all_tiers_exhausted_fails_the_run() {
    let (_, sink) = collecting_sink();
    let pipeline = pipeline(
        MockPlanner::always_failing(),
        MockSynthesizer::always_success(),
        MockSpeech { fail: false },
    );

    let failure = pipeline.run(&config(3), &sink).await.unwrap_err();

    match failure.error.kind() {
        ReelforgeErrorKind::Router(router_err) => match &router_err.kind {
            RouterErrorKind::AllTiersExhausted { failures } => assert_eq!(failures.len(), 3),
            other => panic!("unexpected router error: {other:?}"),
        },
        other => panic!("unexpected error: {other:?}"),
    }

    // The log trail names every exhausted tier and ends with a terminal ERROR.
    let errors: Vec<_> = failure
        .log
        .iter()
        .filter(|entry| entry.severity == Severity::Error)
        .collect();
    assert!(!errors.is_empty());
    for tier in ["t0", "t1", "t2"] {
        assert!(
            failure.log.iter().any(|entry| {
                entry.severity == Severity::Warn && entry.model_tier.as_deref() == Some(tier)
            }),
            "no tier-exhausted entry for {tier}"
        );
    }
}

#[tokio::test]
async fn scenario_d_speech_failure_completes_without_audio() {
    let (_, sink) = collecting_sink();
    let pipeline = pipeline(
        MockPlanner::always(PLAN),
        MockSynthesizer::always_success(),
        MockSpeech { fail: true },
    );

    let result = pipeline.run(&config(3), &sink).await.unwrap();

    assert!(result.final_audio.is_none());
    assert!(result.total_duration_secs >= 60);
    assert!(
        result
            .log
            .iter()
            .any(|entry| entry.severity == Severity::Warn && entry.component == "mastering")
    );
}

#[tokio::test]
async fn forensic_analysis_summarizes_via_the_router() {
    let (_, sink) = collecting_sink();
    let pipeline = pipeline(
        MockPlanner::always("The run failed because every tier was saturated."),
        MockSynthesizer::always_success(),
        MockSpeech { fail: false },
    );
    let result = pipeline.run(&config(1), &sink).await.unwrap();

    let summary = pipeline.forensic_analysis(&result.log).await;
    assert_eq!(summary, "The run failed because every tier was saturated.");
}

#[tokio::test]
async fn forensic_analysis_falls_back_deterministically() {
    let (_, sink) = collecting_sink();
    let failing = pipeline(
        MockPlanner::always_failing(),
        MockSynthesizer::always_success(),
        MockSpeech { fail: false },
    );
    let failure = failing.run(&config(1), &sink).await.unwrap_err();

    let summary = failing.forensic_analysis(&failure.log).await;
    assert!(summary.contains("model analysis unavailable"));
}
