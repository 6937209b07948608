//! Product facts and generation goal.

use serde::{Deserialize, Serialize};

/// Facts about the product being showcased.
///
/// These feed the planning prompt and the deterministic fallback plan, so
/// `name` is the only field that must be non-empty.
///
/// # Examples
///
/// ```
/// use reelforge_core::ProductFacts;
///
/// let facts = ProductFacts::builder()
///     .name("Orbit CRM")
///     .users("small sales teams")
///     .problem("pipeline data scattered across spreadsheets")
///     .build()
///     .unwrap();
///
/// assert_eq!(facts.name, "Orbit CRM");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct ProductFacts {
    /// Product name
    pub name: String,
    /// Who uses the product
    pub users: String,
    /// The problem the product solves
    pub problem: String,
    /// What sets the product apart
    #[builder(default)]
    pub differentiators: Vec<String>,
    /// Constraints the narrative must respect
    #[builder(default)]
    pub constraints: Vec<String>,
}

impl ProductFacts {
    /// Creates a new product facts builder.
    pub fn builder() -> ProductFactsBuilder {
        ProductFactsBuilder::default()
    }
}

/// What the generated video should be.
///
/// # Examples
///
/// ```
/// use reelforge_core::GenerationGoal;
///
/// let goal = GenerationGoal::builder()
///     .category("product walkthrough")
///     .target_minutes(5u32)
///     .tone("confident, plain-spoken")
///     .audience("prospective customers")
///     .build()
///     .unwrap();
///
/// assert_eq!(goal.target_seconds(), 300);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerationGoal {
    /// Video category (walkthrough, launch teaser, deep dive, ...)
    pub category: String,
    /// Target duration in minutes
    pub target_minutes: u32,
    /// Narrative tone
    pub tone: String,
    /// Intended audience
    pub audience: String,
}

impl GenerationGoal {
    /// Creates a new generation goal builder.
    pub fn builder() -> GenerationGoalBuilder {
        GenerationGoalBuilder::default()
    }

    /// Target duration in seconds.
    pub fn target_seconds(&self) -> u32 {
        self.target_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_seconds_scales_minutes() {
        let goal = GenerationGoal::builder()
            .category("teaser")
            .target_minutes(3u32)
            .tone("upbeat")
            .audience("developers")
            .build()
            .unwrap();
        assert_eq!(goal.target_seconds(), 180);
    }
}
