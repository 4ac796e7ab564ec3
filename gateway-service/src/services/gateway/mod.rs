//! Gateway abstraction over the external generative AI service.
//!
//! The four operations the proxy exposes are modeled as a trait so route
//! handlers depend on `Arc<dyn GenerativeGateway>` rather than a concrete
//! provider, and tests can substitute a recording stub.

pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for gateway operations.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited by upstream")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// One prior turn of a conversation, supplied by the caller.
///
/// The proxy itself holds no conversation state; multi-turn context travels
/// in the request.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_provider_role(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// A web citation backing a grounded answer.
///
/// Both fields are always present; missing provider data is substituted with
/// the `"Source"` / `"#"` placeholders at extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub uri: String,
}

/// Answer text plus its citations, in provider ranking order.
#[derive(Debug, Clone)]
pub struct GroundedAnswer {
    pub text: String,
    pub sources: Vec<SourceLink>,
}

/// The four operations backed by the external generative AI service.
#[async_trait]
pub trait GenerativeGateway: Send + Sync {
    /// Single chat reply for `message`, given the caller's prior turns.
    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, GatewayError>;

    /// Describe or answer questions about one inline image.
    async fn describe_image(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> Result<String, GatewayError>;

    /// Generate an image for `prompt`.
    ///
    /// `Ok(None)` means the model produced no image part; callers must treat
    /// that as a valid outcome, not a fault.
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GatewayError>;

    /// Answer `query` with web-search grounding.
    async fn search(&self, query: &str) -> Result<GroundedAnswer, GatewayError>;
}
