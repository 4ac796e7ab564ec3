//! Typed client for the gateway-service REST endpoints.
//!
//! Panels depend on the `StudioApi` trait so tests can substitute a stub;
//! `GatewayClient` is the reqwest implementation used in production.

use crate::config::GatewaySettings;
use crate::models::{ChatMessage, SearchOutcome, SourceRef};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not reach the AI gateway: {0}")]
    Transport(String),

    /// The gateway answered with its `{error, details}` envelope.
    #[error("{message}")]
    Service { status: u16, message: String },
}

/// The four proxy operations as the panels see them.
#[async_trait]
pub trait StudioApi: Send + Sync {
    async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, ApiError>;

    async fn vision(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> Result<String, ApiError>;

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, ApiError>;

    async fn search(&self, query: &str) -> Result<SearchOutcome, ApiError>;
}

pub struct GatewayClient {
    client: Client,
    settings: GatewaySettings,
}

impl GatewayClient {
    pub fn new(settings: GatewaySettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: for<'de> Deserialize<'de>,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.settings.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", url, e);
                ApiError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("AI gateway returned status {}", status));

            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse response from {}: {}", url, e);
            ApiError::Transport(e.to_string())
        })
    }
}

#[async_trait]
impl StudioApi for GatewayClient {
    async fn chat(&self, message: &str, history: &[ChatMessage]) -> Result<String, ApiError> {
        let payload = ChatPayload {
            message,
            history: history
                .iter()
                .map(|msg| TurnPayload {
                    role: msg.role.as_str(),
                    content: &msg.content,
                })
                .collect(),
        };

        let body: TextBody = self.post("/api/chat", &payload).await?;
        Ok(body.text)
    }

    async fn vision(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> Result<String, ApiError> {
        let payload = VisionPayload {
            image: image_base64,
            prompt,
            mime_type,
        };

        let body: TextBody = self.post("/api/vision", &payload).await?;
        Ok(body.text)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, ApiError> {
        let body: ImageBody = self.post("/api/image", &PromptPayload { prompt }).await?;
        Ok(body.image)
    }

    async fn search(&self, query: &str) -> Result<SearchOutcome, ApiError> {
        let body: SearchBody = self.post("/api/search", &QueryPayload { query }).await?;
        Ok(SearchOutcome {
            text: body.text,
            sources: body.sources,
        })
    }
}

#[derive(Serialize)]
struct ChatPayload<'a> {
    message: &'a str,
    history: Vec<TurnPayload<'a>>,
}

#[derive(Serialize)]
struct TurnPayload<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct VisionPayload<'a> {
    image: &'a str,
    prompt: &'a str,
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
}

#[derive(Serialize)]
struct PromptPayload<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
struct QueryPayload<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct TextBody {
    text: String,
}

#[derive(Deserialize)]
struct ImageBody {
    image: Option<String>,
}

#[derive(Deserialize)]
struct SearchBody {
    text: String,
    sources: Vec<SourceRef>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}
