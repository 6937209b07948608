//! Grounding record resolution.
//!
//! Planning needs at least one grounding record. Resolution tries, in order:
//! the manual override payload, placeholder records synthesized from the
//! recording list, and finally one synthetic default record.

use crate::normalize::{normalize_payload, parse_json};
use reelforge_core::{GroundingRecord, PipelineConfig, RunLog};
use tracing::{debug, warn};

/// Resolve the grounding records for one run. Never returns an empty list.
pub fn resolve_grounding(config: &PipelineConfig, log: &RunLog) -> Vec<GroundingRecord> {
    if let Some(manual) = config.manual_grounding() {
        match parse_json::<Vec<GroundingRecord>>(&normalize_payload(manual)) {
            Ok(records) if !records.is_empty() => {
                debug!(count = records.len(), "using manual grounding override");
                log.info(
                    "grounding",
                    format!("parsed {} manual grounding records", records.len()),
                );
                return records;
            }
            Ok(_) => {
                warn!("manual grounding parsed to an empty list, ignoring");
                log.warn("grounding", "manual grounding empty, falling back");
            }
            Err(err) => {
                warn!(error = %err, "manual grounding did not parse, ignoring");
                log.warn(
                    "grounding",
                    format!("manual grounding did not parse ({err}), falling back"),
                );
            }
        }
    }

    if !config.recording_ids().is_empty() {
        let records: Vec<GroundingRecord> = config
            .recording_ids()
            .iter()
            .enumerate()
            .map(|(i, recording_id)| {
                GroundingRecord::new(
                    format!("scene-{i}"),
                    format!(
                        "Screen walkthrough of {} captured in recording {recording_id}",
                        config.facts().name
                    ),
                    0.5,
                    recording_id.clone(),
                )
            })
            .collect();
        log.info(
            "grounding",
            format!("synthesized {} placeholder grounding records", records.len()),
        );
        return records;
    }

    log.warn("grounding", "no recordings supplied, using synthetic default");
    vec![GroundingRecord::new(
        "scene-default",
        format!("Product overview of {}", config.facts().name),
        0.5,
        "none",
    )]
}
