//! The ranked model tier catalogue.
//!
//! Tiers are ordered most capable first. The catalogue ships with bundled
//! defaults and supports TOML overrides with user values taking precedence:
//! 1. Bundled defaults (reelforge.toml shipped with the crate)
//! 2. User config in home directory (~/.config/reelforge/reelforge.toml)
//! 3. User config in current directory (./reelforge.toml)

use config::{Config, File, FileFormat};
use reelforge_error::{ConfigError, ReelforgeResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Capability rank of a model tier. Rank 0 is the most capable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TierRank(pub u8);

impl std::fmt::Display for TierRank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier{}", self.0)
    }
}

/// One entry in the model tier catalogue.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelTier {
    /// Model identifier sent to the provider (e.g. "gemini-2.5-pro")
    pub id: String,
    /// Human-readable name for logs and results
    pub display_name: String,
    /// Capability rank, 0 = most capable
    pub rank: TierRank,
    /// Context window budget in tokens
    pub context_tokens: u64,
    /// Provider name (e.g. "gemini")
    pub provider: String,
}

/// The ordered list of model tiers the fallback router escalates through.
///
/// # Examples
///
/// ```no_run
/// use reelforge_models::TierCatalog;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = TierCatalog::load()?;
/// assert!(!catalog.is_empty());
/// assert_eq!(catalog.tiers[0].rank.0, 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct TierCatalog {
    /// Tiers sorted most capable first
    #[serde(default)]
    pub tiers: Vec<ModelTier>,
}

impl TierCatalog {
    /// Parse a catalogue from TOML text and sort it by rank.
    pub fn from_toml_str(toml: &str) -> ReelforgeResult<Self> {
        let catalog: TierCatalog = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read tier catalogue: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse tier catalogue: {}", e)))?;
        Ok(catalog.sorted())
    }

    /// Load a catalogue from a specific file path.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ReelforgeResult<Self> {
        debug!("Loading tier catalogue from file");

        let catalog: TierCatalog = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read tier catalogue from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse tier catalogue: {}", e)))?;
        Ok(catalog.sorted())
    }

    /// Load the catalogue with precedence: user override > bundled default.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> ReelforgeResult<Self> {
        debug!("Loading tier catalogue with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../reelforge.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/reelforge/reelforge.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("reelforge").required(false));

        let catalog: TierCatalog = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build tier catalogue: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse tier catalogue: {}", e)))?;
        Ok(catalog.sorted())
    }

    /// Number of tiers in the catalogue.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// True if the catalogue has no tiers.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Tier at the given position, if any.
    pub fn get(&self, index: usize) -> Option<&ModelTier> {
        self.tiers.get(index)
    }

    fn sorted(mut self) -> Self {
        self.tiers.sort_by_key(|tier| tier.rank);
        self
    }
}
