//! The chapter planner.
//!
//! One planning call produces the whole chapter list. The response may be a
//! bare JSON array of chapter descriptors or an object wrapping one under a
//! recognized container key; acceptance order is data-declared in
//! [`CONTAINER_KEYS`]. Parse failures never fail the run: a deterministic
//! single-chapter plan derived from the product facts stands in.

use crate::normalize::{normalize_payload, parse_json};
use reelforge_core::{Chapter, GenerationGoal, GroundingRecord, ProductFacts, RunLog};
use reelforge_error::ReelforgeResult;
use reelforge_models::FallbackRouter;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Accepted object container keys, in acceptance order.
pub const CONTAINER_KEYS: [&str; 3] = ["chapters", "plan", "segments"];

/// One chapter as described by the planning model.
#[derive(Debug, Clone, Deserialize)]
struct ChapterDescriptor {
    title: String,
    #[serde(default, alias = "duration_secs", alias = "duration")]
    target_secs: Option<u32>,
    #[serde(default, alias = "visual", alias = "visual_description")]
    visual_intent: Option<String>,
    #[serde(default, alias = "script", alias = "voiceover")]
    narration: Option<String>,
}

/// Plan the chapter list for one run.
///
/// Issues one planning call through the fallback router; the response is
/// normalized and matched against the accepted shapes. Router errors (all
/// tiers exhausted) propagate; everything else degrades to the fallback plan.
#[instrument(skip_all)]
pub async fn plan_chapters(
    router: &FallbackRouter,
    facts: &ProductFacts,
    goal: &GenerationGoal,
    grounding: &[GroundingRecord],
    log: &RunLog,
) -> ReelforgeResult<Vec<Chapter>> {
    let prompt = planning_prompt(facts, goal, grounding);
    let response = router.execute("chapter_planning", &prompt).await?;

    let payload = normalize_payload(&response);
    match accept_descriptors(&payload) {
        Some(descriptors) => {
            debug!(count = descriptors.len(), "planner response accepted");
            log.info(
                "planner",
                format!("planned {} chapters", descriptors.len()),
            );
            Ok(to_chapters(descriptors, facts, goal, grounding))
        }
        None => {
            warn!("planner response did not match any accepted shape");
            log.warn(
                "planner",
                "planner response unparsable, substituting fallback plan",
            );
            Ok(fallback_plan(facts, goal, grounding))
        }
    }
}

/// The deterministic single-chapter plan used when planning output is
/// unusable. Titled from the product name and grounded in record 0.
pub fn fallback_plan(
    facts: &ProductFacts,
    goal: &GenerationGoal,
    grounding: &[GroundingRecord],
) -> Vec<Chapter> {
    let visual_intent = grounding
        .first()
        .map(|record| record.description.clone())
        .unwrap_or_else(|| format!("Product overview of {}", facts.name));
    vec![Chapter::planned(
        0,
        format!("Introducing {}", facts.name),
        goal.target_seconds(),
        visual_intent,
        format!(
            "{} helps {} with {}.",
            facts.name, facts.users, facts.problem
        ),
    )]
}

fn planning_prompt(facts: &ProductFacts, goal: &GenerationGoal, grounding: &[GroundingRecord]) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Plan a {} video for the product \"{}\" aimed at {}.\n",
        goal.category, facts.name, goal.audience
    ));
    prompt.push_str(&format!(
        "Users: {}. Problem solved: {}. Tone: {}.\n",
        facts.users, facts.problem, goal.tone
    ));
    if !facts.differentiators.is_empty() {
        prompt.push_str(&format!(
            "Differentiators: {}.\n",
            facts.differentiators.join("; ")
        ));
    }
    if !facts.constraints.is_empty() {
        prompt.push_str(&format!("Constraints: {}.\n", facts.constraints.join("; ")));
    }
    prompt.push_str("Observed product behavior:\n");
    for record in grounding {
        prompt.push_str(&format!(
            "- [{}] {} (importance {:.1})\n",
            record.scene_id, record.description, record.importance
        ));
    }
    prompt.push_str(&format!(
        "\nTotal target duration: {} seconds. Split it across 3-8 chapters.\n",
        goal.target_seconds()
    ));
    prompt.push_str(
        "Output ONLY a valid JSON array of chapter objects with keys \
         \"title\", \"target_secs\", \"visual_intent\", \"narration\".",
    );
    prompt
}

/// Match the normalized payload against the accepted shapes, in order:
/// a bare array first, then an object with one of the container keys.
/// Returns the first non-empty sequence that type-checks.
fn accept_descriptors(payload: &str) -> Option<Vec<ChapterDescriptor>> {
    let value: serde_json::Value = parse_json(payload).ok()?;

    if value.is_array() {
        let descriptors: Vec<ChapterDescriptor> = serde_json::from_value(value).ok()?;
        return (!descriptors.is_empty()).then_some(descriptors);
    }

    if let serde_json::Value::Object(mut map) = value {
        for key in CONTAINER_KEYS {
            let Some(inner) = map.remove(key) else {
                continue;
            };
            if let Ok(descriptors) = serde_json::from_value::<Vec<ChapterDescriptor>>(inner) {
                if !descriptors.is_empty() {
                    return Some(descriptors);
                }
            }
        }
    }

    None
}

fn to_chapters(
    descriptors: Vec<ChapterDescriptor>,
    facts: &ProductFacts,
    goal: &GenerationGoal,
    grounding: &[GroundingRecord],
) -> Vec<Chapter> {
    let count = descriptors.len();
    let default_secs = (goal.target_seconds() / count as u32).max(1);
    descriptors
        .into_iter()
        .enumerate()
        .map(|(position, descriptor)| {
            // Grounding is linked by position, wrapping when shorter.
            let record = (!grounding.is_empty()).then(|| &grounding[position % grounding.len()]);
            Chapter::planned(
                position,
                descriptor.title,
                descriptor.target_secs.unwrap_or(default_secs),
                descriptor.visual_intent.unwrap_or_else(|| match record {
                    Some(record) => record.description.clone(),
                    None => format!("Product overview of {}", facts.name),
                }),
                descriptor.narration.unwrap_or_default(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelforge_core::ChapterStatus;

    fn facts() -> ProductFacts {
        ProductFacts::builder()
            .name("Orbit CRM")
            .users("small sales teams")
            .problem("scattered pipeline data")
            .build()
            .unwrap()
    }

    fn goal() -> GenerationGoal {
        GenerationGoal::builder()
            .category("walkthrough")
            .target_minutes(1u32)
            .tone("plain")
            .audience("buyers")
            .build()
            .unwrap()
    }

    fn grounding() -> Vec<GroundingRecord> {
        vec![
            GroundingRecord::new("s0", "opens the dashboard", 0.9, "rec-0"),
            GroundingRecord::new("s1", "filters the pipeline", 0.7, "rec-1"),
        ]
    }

    #[test]
    fn accepts_bare_array() {
        let payload = r#"[{"title": "Opening"}, {"title": "Workflow"}]"#;
        let descriptors = accept_descriptors(payload).unwrap();
        assert_eq!(descriptors.len(), 2);
    }

    #[test]
    fn accepts_container_keys_in_declared_order() {
        for key in CONTAINER_KEYS {
            let payload = format!(r#"{{"{key}": [{{"title": "Opening"}}]}}"#);
            assert!(accept_descriptors(&payload).is_some(), "key {key} rejected");
        }
    }

    #[test]
    fn rejects_empty_and_misshapen_payloads() {
        assert!(accept_descriptors("[]").is_none());
        assert!(accept_descriptors(r#"{"chapters": []}"#).is_none());
        assert!(accept_descriptors(r#"{"other": [{"title": "x"}]}"#).is_none());
        assert!(accept_descriptors("not json").is_none());
    }

    #[test]
    fn chapters_link_grounding_by_position_modulo() {
        let descriptors = vec![
            ChapterDescriptor {
                title: "A".to_string(),
                target_secs: None,
                visual_intent: None,
                narration: None,
            },
            ChapterDescriptor {
                title: "B".to_string(),
                target_secs: None,
                visual_intent: None,
                narration: None,
            },
            ChapterDescriptor {
                title: "C".to_string(),
                target_secs: None,
                visual_intent: None,
                narration: None,
            },
        ];
        let chapters = to_chapters(descriptors, &facts(), &goal(), &grounding());
        assert_eq!(chapters[0].visual_intent, "opens the dashboard");
        assert_eq!(chapters[1].visual_intent, "filters the pipeline");
        // Wraps back around to record 0.
        assert_eq!(chapters[2].visual_intent, "opens the dashboard");
        assert!(chapters.iter().all(|c| c.status == ChapterStatus::Queued));
        assert!(chapters.iter().all(|c| c.retry_count == 0));
    }

    #[test]
    fn empty_grounding_falls_back_to_product_overview_intent() {
        let descriptors = vec![ChapterDescriptor {
            title: "A".to_string(),
            target_secs: None,
            visual_intent: None,
            narration: None,
        }];
        let chapters = to_chapters(descriptors, &facts(), &goal(), &[]);
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].visual_intent, "Product overview of Orbit CRM");
    }

    #[test]
    fn fallback_plan_is_titled_from_product_name() {
        let chapters = fallback_plan(&facts(), &goal(), &grounding());
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Introducing Orbit CRM");
        assert_eq!(chapters[0].visual_intent, "opens the dashboard");
        assert_eq!(chapters[0].target_secs, 60);
    }
}
