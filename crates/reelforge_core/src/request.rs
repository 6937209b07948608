//! Request and response types for planning-model calls.

use serde::{Deserialize, Serialize};

/// A text-generation request routed through the model fallback router.
///
/// The router fills in `model` from the active tier; callers normally leave
/// it unset.
///
/// # Examples
///
/// ```
/// use reelforge_core::ModelRequest;
///
/// let request = ModelRequest::builder()
///     .prompt("Plan five chapters for a product walkthrough.")
///     .json_only(true)
///     .build()
///     .unwrap();
///
/// assert!(request.json_only);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct ModelRequest {
    /// The user prompt
    pub prompt: String,
    /// Optional system prompt
    pub system: Option<String>,
    /// Model identifier to use; set by the router from the active tier
    pub model: Option<String>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Hint that the response must be a bare JSON payload
    pub json_only: bool,
}

impl ModelRequest {
    /// Creates a new model request builder.
    pub fn builder() -> ModelRequestBuilder {
        ModelRequestBuilder::default()
    }
}

/// The unified text response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The generated text
    pub text: String,
}

impl ModelResponse {
    /// Wrap generated text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
