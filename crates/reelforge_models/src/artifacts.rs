//! HTTP-backed artifact retrieval.

use async_trait::async_trait;
use reelforge_core::ArtifactRef;
use reelforge_error::{ReelforgeResult, SynthesisError, SynthesisErrorKind};
use reelforge_interface::ArtifactStore;
use reqwest::Client;
use tracing::{debug, instrument};

/// Downloads artifact bytes over authenticated HTTPS.
///
/// Synthesis backends hand out URIs that require the caller's API key; the
/// store attaches it as a header on every fetch.
#[derive(Debug, Clone)]
pub struct HttpArtifactStore {
    client: Client,
    api_key: Option<String>,
}

impl HttpArtifactStore {
    /// Create a store, optionally carrying an API key for authenticated URIs.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

impl Default for HttpArtifactStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl ArtifactStore for HttpArtifactStore {
    #[instrument(skip(self), fields(uri = %artifact.uri))]
    async fn fetch(&self, artifact: &ArtifactRef) -> ReelforgeResult<Vec<u8>> {
        debug!("Fetching artifact bytes");

        let mut request = self.client.get(&artifact.uri);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            SynthesisError::new(SynthesisErrorKind::Transport(format!(
                "Artifact download failed: {}",
                e
            )))
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(SynthesisError::new(SynthesisErrorKind::Transport(format!(
                "Artifact download returned HTTP {}",
                status
            )))
            .into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            SynthesisError::new(SynthesisErrorKind::Transport(format!(
                "Artifact body read failed: {}",
                e
            )))
        })?;
        Ok(bytes.to_vec())
    }
}
