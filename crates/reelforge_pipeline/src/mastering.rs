//! Narration concatenation and audio mastering.

use reelforge_core::{AudioClip, Chapter, RunLog};
use reelforge_models::FallbackRouter;
use tracing::{debug, instrument};

/// Concatenate narration from a prefix of chapters proportional to the
/// footage actually produced.
///
/// When the chain was capped below target, narrating every chapter would
/// describe content with no corresponding visuals, so only
/// `ceil(accumulated / target × chapters)` scripts are included (at least one
/// whenever any footage exists).
pub fn narration_transcript(chapters: &[Chapter], accumulated_secs: u32, target_secs: u32) -> String {
    if chapters.is_empty() || accumulated_secs == 0 {
        return String::new();
    }

    let fraction = if target_secs == 0 {
        1.0
    } else {
        (f64::from(accumulated_secs) / f64::from(target_secs)).clamp(0.0, 1.0)
    };
    let count = ((fraction * chapters.len() as f64).ceil() as usize)
        .max(1)
        .min(chapters.len());

    chapters[..count]
        .iter()
        .map(|chapter| chapter.narration.trim())
        .filter(|narration| !narration.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Master the audio track for a completed chain.
///
/// Returns the transcript actually sent to speech synthesis and the clip, if
/// any. Speech failure never blocks completion; the result simply carries no
/// audio.
#[instrument(skip_all)]
pub async fn master_audio(
    router: &FallbackRouter,
    chapters: &[Chapter],
    accumulated_secs: u32,
    target_secs: u32,
    log: &RunLog,
) -> (String, Option<AudioClip>) {
    let transcript = narration_transcript(chapters, accumulated_secs, target_secs);
    if transcript.is_empty() {
        debug!("no narration to synthesize");
        log.debug("mastering", "no narration to synthesize");
        return (transcript, None);
    }

    log.info(
        "mastering",
        format!("synthesizing narration ({} chars)", transcript.len()),
    );
    let audio = router.generate_speech(&transcript).await;
    if audio.is_none() {
        log.warn("mastering", "speech synthesis failed, completing without audio");
    }
    (transcript, audio)
}
