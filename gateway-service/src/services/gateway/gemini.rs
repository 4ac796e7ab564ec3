//! Gemini implementation of the generative gateway.
//!
//! Owns the provider payload shapes for all four operations and the
//! extraction of text, inline images and web citations from the nested
//! response structure.

use super::{ChatTurn, GatewayError, GenerativeGateway, GroundedAnswer, SourceLink};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fixed system instruction for the chat operation.
const CHAT_SYSTEM_INSTRUCTION: &str = "You are a helpful, precise, and world-class AI assistant.";

/// Prompt used when the vision caller supplies an empty one.
const DEFAULT_VISION_PROMPT: &str = "Describe this image in detail.";

/// Fallback literals for empty-but-successful provider responses.
const NO_RESPONSE: &str = "No response";
const NO_ANALYSIS: &str = "No analysis available";
const NO_RESULTS: &str = "No results found.";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
}

/// Gemini-backed gateway.
pub struct GeminiClient {
    settings: GeminiSettings,
    client: Client,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(settings.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { settings, client }
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            GEMINI_API_BASE, model, method, self.settings.api_key
        )
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GatewayError> {
        let url = self.api_url(model, "generateContent");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(GatewayError::RateLimited);
            }

            return Err(GatewayError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl GenerativeGateway for GeminiClient {
    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, GatewayError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: Some(turn.role.as_provider_role().to_string()),
                parts: vec![ContentPart::Text {
                    text: turn.content.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![ContentPart::Text {
                text: message.to_string(),
            }],
        });

        let request = GenerateContentRequest {
            contents,
            system_instruction: Some(SystemInstruction {
                parts: vec![ContentPart::Text {
                    text: CHAT_SYSTEM_INSTRUCTION.to_string(),
                }],
            }),
            tools: None,
        };

        tracing::debug!(
            model = %self.settings.text_model,
            message_len = message.len(),
            history_len = history.len(),
            "Sending chat request to Gemini API"
        );

        let response = self.generate(&self.settings.text_model, &request).await?;
        Ok(response_text(&response).unwrap_or_else(|| NO_RESPONSE.to_string()))
    }

    async fn describe_image(
        &self,
        image_base64: &str,
        prompt: &str,
        mime_type: &str,
    ) -> Result<String, GatewayError> {
        let prompt = if prompt.is_empty() {
            DEFAULT_VISION_PROMPT
        } else {
            prompt
        };
        let mime_type = if mime_type.is_empty() {
            "image/jpeg"
        } else {
            mime_type
        };

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    ContentPart::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: image_base64.to_string(),
                        },
                    },
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            system_instruction: None,
            tools: None,
        };

        tracing::debug!(
            model = %self.settings.text_model,
            image_len = image_base64.len(),
            mime_type = %mime_type,
            "Sending vision request to Gemini API"
        );

        let response = self.generate(&self.settings.text_model, &request).await?;
        Ok(response_text(&response).unwrap_or_else(|| NO_ANALYSIS.to_string()))
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart::Text {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: None,
            tools: None,
        };

        tracing::debug!(
            model = %self.settings.image_model,
            prompt_len = prompt.len(),
            "Sending image generation request to Gemini API"
        );

        let response = self.generate(&self.settings.image_model, &request).await?;
        Ok(first_inline_image(&response))
    }

    async fn search(&self, query: &str) -> Result<GroundedAnswer, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![ContentPart::Text {
                    text: query.to_string(),
                }],
            }],
            system_instruction: None,
            tools: Some(vec![Tool {
                google_search: EmptyConfig {},
            }]),
        };

        tracing::debug!(
            model = %self.settings.text_model,
            query_len = query.len(),
            "Sending grounded search request to Gemini API"
        );

        let response = self.generate(&self.settings.text_model, &request).await?;

        Ok(GroundedAnswer {
            text: response_text(&response).unwrap_or_else(|| NO_RESULTS.to_string()),
            sources: web_sources(&response),
        })
    }
}

/// Concatenated text of the first candidate's text parts, if any.
fn response_text(response: &GenerateContentResponse) -> Option<String> {
    let parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| content.parts.as_slice())?;

    let text: String = parts
        .iter()
        .filter_map(|p| match p {
            ContentPart::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect();

    if text.is_empty() { None } else { Some(text) }
}

/// First inline-image payload of the first candidate, re-encoded as a
/// `data:image/png;base64` URI. `None` when no image part is present.
fn first_inline_image(response: &GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|content| {
            content.parts.iter().find_map(|p| match p {
                ContentPart::InlineData { inline_data } => {
                    Some(format!("data:image/png;base64,{}", inline_data.data))
                }
                _ => None,
            })
        })
}

/// Web citations from the first candidate's grounding chunks, in provider
/// order. Chunks without a web citation are dropped; missing titles and URIs
/// get placeholder values.
fn web_sources(response: &GenerateContentResponse) -> Vec<SourceLink> {
    response
        .candidates
        .first()
        .and_then(|c| c.grounding_metadata.as_ref())
        .map(|metadata| {
            metadata
                .grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .map(|web| SourceLink {
                    title: web.title.clone().unwrap_or_else(|| "Source".to_string()),
                    uri: web.uri.clone().unwrap_or_else(|| "#".to_string()),
                })
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: EmptyConfig,
}

#[derive(Debug, Serialize)]
struct EmptyConfig {}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebSource {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}
