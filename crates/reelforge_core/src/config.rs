//! Pipeline run configuration.

use crate::{GenerationGoal, ProductFacts};
use serde::{Deserialize, Serialize};

/// Input configuration for one pipeline run.
///
/// Immutable for the duration of the run. Source recordings are referenced by
/// identifier only; the pipeline never touches recording bytes itself. A
/// manually supplied grounding payload, when present, takes precedence over
/// placeholder grounding synthesized from the recording list.
///
/// # Examples
///
/// ```
/// use reelforge_core::{GenerationGoal, PipelineConfig, ProductFacts};
///
/// let config = PipelineConfig::builder()
///     .facts(ProductFacts::builder().name("Orbit CRM").build().unwrap())
///     .goal(
///         GenerationGoal::builder()
///             .category("walkthrough")
///             .target_minutes(1u32)
///             .tone("plain")
///             .audience("buyers")
///             .build()
///             .unwrap(),
///     )
///     .recording_ids(vec!["rec-001".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(config.recording_ids().len(), 1);
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder, derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct PipelineConfig {
    /// Product facts fed to planning and fallback content
    facts: ProductFacts,
    /// Goal for the generated video
    goal: GenerationGoal,
    /// Identifiers of analyzed source recordings
    #[builder(default)]
    recording_ids: Vec<String>,
    /// Raw manual grounding payload, parsed as structured data when present
    #[builder(default)]
    manual_grounding: Option<String>,
}

impl PipelineConfig {
    /// Creates a new pipeline config builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}
