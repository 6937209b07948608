//! Grounding records derived from source recordings.

use serde::{Deserialize, Serialize};

/// One unit of "ground truth" derived from an analyzed recording scene.
///
/// Produced once per run (parsed from the manual override or synthesized from
/// the recording list) and read-only afterward. At least one record exists
/// before planning begins; a synthetic default is substituted when the
/// recording list is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingRecord {
    /// Scene identifier
    pub scene_id: String,
    /// Free-text description of the visual event
    pub description: String,
    /// Importance/confidence in `[0, 1]`
    pub importance: f64,
    /// Identifier of the source recording this scene came from
    pub recording_id: String,
}

impl GroundingRecord {
    /// Create a record, clamping importance into `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelforge_core::GroundingRecord;
    ///
    /// let rec = GroundingRecord::new("scene-1", "user opens the dashboard", 1.7, "rec-001");
    /// assert_eq!(rec.importance, 1.0);
    /// ```
    pub fn new(
        scene_id: impl Into<String>,
        description: impl Into<String>,
        importance: f64,
        recording_id: impl Into<String>,
    ) -> Self {
        Self {
            scene_id: scene_id.into(),
            description: description.into(),
            importance: importance.clamp(0.0, 1.0),
            recording_id: recording_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_is_clamped() {
        assert_eq!(GroundingRecord::new("s", "d", -0.5, "r").importance, 0.0);
        assert_eq!(GroundingRecord::new("s", "d", 0.5, "r").importance, 0.5);
        assert_eq!(GroundingRecord::new("s", "d", 2.0, "r").importance, 1.0);
    }
}
