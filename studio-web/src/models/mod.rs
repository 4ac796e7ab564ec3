//! Panel-local domain types, serializable for session storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The five views of the shell. `Home` is the initial state; every mode is
/// reachable from every other via the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Home,
    Chat,
    Vision,
    ImageGen,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Model => "model",
        }
    }
}

/// One turn of the chat panel's conversation. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Model, content)
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        ChatMessage {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A generated image in the imagine panel's gallery, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub prompt: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Result of the last vision analysis, with the uploaded image kept as a
/// data-URI preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionOutcome {
    pub preview: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub uri: String,
}

/// Result of the last grounded search; sources stay in provider order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub text: String,
    pub sources: Vec<SourceRef>,
}
