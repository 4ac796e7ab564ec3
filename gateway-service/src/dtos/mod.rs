//! Request/response bodies for the proxy endpoints.
//!
//! Required fields are `Option`s so handlers can fail fast with the
//! operation-specific 400 message instead of a deserialization rejection.

use crate::services::gateway::{ChatRole, ChatTurn, SourceLink};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Prior turns of the conversation, oldest first.
    #[serde(default)]
    pub history: Option<Vec<ChatTurnDto>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurnDto {
    pub role: String,
    pub content: String,
}

impl From<ChatTurnDto> for ChatTurn {
    fn from(dto: ChatTurnDto) -> Self {
        ChatTurn {
            role: match dto.role.as_str() {
                "model" => ChatRole::Model,
                _ => ChatRole::User,
            },
            content: dto.content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VisionRequest {
    pub image: Option<String>,
    pub prompt: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImageGenRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// `image` is `null` when the model produced no image part.
#[derive(Debug, Serialize)]
pub struct ImageGenResponse {
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub text: String,
    pub sources: Vec<SourceLink>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime: f64,
    pub timestamp: String,
}
