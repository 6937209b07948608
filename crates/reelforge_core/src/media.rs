//! Artifact and media reference types.

use serde::{Deserialize, Serialize};

/// Opaque reference to a produced visual artifact.
///
/// The artifact lives on the synthesis backend; the pipeline only ever passes
/// this reference around (and hands it to the artifact store for download).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Authenticated URI the artifact bytes can be fetched from
    pub uri: String,
    /// MIME type of the artifact
    pub mime_type: String,
}

impl ArtifactRef {
    /// Create a new artifact reference.
    pub fn new(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Reference to an MP4 video artifact.
    pub fn video(uri: impl Into<String>) -> Self {
        Self::new(uri, "video/mp4")
    }
}

/// Opaque continuation token seeding the next chained generation call.
///
/// The synthesis service conditions visual continuity on the immediately
/// preceding artifact; this token is the only way to reference it as a seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContinuationToken(pub String);

impl ContinuationToken {
    /// Create a token from its backend representation.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Backend representation of the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Inline-encoded audio returned by speech synthesis.
///
/// Raw PCM at a fixed sample rate; mastering attaches it to the result as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    /// Raw PCM samples
    pub pcm: Vec<u8>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioClip {
    /// Create a clip from raw PCM bytes.
    pub fn new(pcm: Vec<u8>, sample_rate: u32) -> Self {
        Self { pcm, sample_rate }
    }
}
