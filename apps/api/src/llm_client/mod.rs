/// Model Gateway — the single point of entry for all generative-model calls in Studio.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through a `ModelGateway`.
///
/// The gateway has two mutually exclusive modes per call:
/// - schema mode: `response_shape` is set, the model is asked for JSON matching it
/// - search mode: `enable_search_augmentation` is set, the model answers in free text
///   and grounding citations come back alongside
///
/// The gateway never validates reply text and never retries. Both belong to the caller.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod gemini;
#[cfg(test)]
pub mod testing;

pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unreadable response envelope: {0}")]
    Envelope(String),

    #[error("Invalid request options: {0}")]
    InvalidOptions(String),
}

impl GatewayError {
    /// Transport failures, rate limits and server errors may succeed on a later attempt.
    /// Everything else (auth, bad request, unreadable envelope) will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Http(_) => true,
            GatewayError::Api { status, .. } => *status == 429 || *status >= 500,
            GatewayError::Envelope(_) | GatewayError::InvalidOptions(_) => false,
        }
    }
}

/// A structured-output schema declaration, in the model's schema dialect
/// (`{"type": "OBJECT", "properties": {...}, "required": [...]}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResponseShape(serde_json::Value);

impl ResponseShape {
    pub fn new(schema: serde_json::Value) -> Self {
        Self(schema)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Per-call options accompanying a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub response_shape: Option<ResponseShape>,
    pub enable_search_augmentation: bool,
    pub system_instruction: String,
}

impl RequestOptions {
    /// Search grounding and a declared response shape cannot be combined in one call.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.enable_search_augmentation && self.response_shape.is_some() {
            return Err(GatewayError::InvalidOptions(
                "search augmentation cannot be combined with a response shape".to_string(),
            ));
        }
        Ok(())
    }
}

/// A grounding source the model consulted. The URL is always present; titles are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    pub title: Option<String>,
}

/// The model's raw reply: narrative or JSON text, plus any grounding citations in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReply {
    pub text: String,
    pub citations: Vec<Citation>,
}

impl RawReply {
    #[cfg(test)]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }
}

/// The low-level model capability consumed by the mediation layer.
///
/// Carried in `AppState` as `Arc<dyn ModelGateway>` so tests can swap in a mock.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn submit(&self, prompt: &str, options: &RequestOptions)
        -> Result<RawReply, GatewayError>;
}
