use crate::dtos::{
    ChatRequest, ImageGenRequest, ImageGenResponse, SearchRequest, SearchResponse, TextResponse,
    VisionRequest,
};
use crate::services::gateway::ChatTurn;
use crate::startup::AppState;
use axum::{extract::State, Json};
use studio_core::error::AppError;

/// Require a non-empty string field, failing with the given 400 message.
fn required<'a>(field: &'a Option<String>, message: &'static str) -> Result<&'a str, AppError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::BadRequest(anyhow::anyhow!(message))),
    }
}

pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let message = required(&req.message, "Message is required")?;
    let history: Vec<ChatTurn> = req
        .history
        .unwrap_or_default()
        .into_iter()
        .map(Into::into)
        .collect();

    let text = state
        .gateway
        .chat(message, &history)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Chat generation failed");
            AppError::upstream("Chat generation failed", e)
        })?;

    Ok(Json(TextResponse { text }))
}

pub async fn vision(
    State(state): State<AppState>,
    Json(req): Json<VisionRequest>,
) -> Result<Json<TextResponse>, AppError> {
    let (image, prompt) = match (req.image.as_deref(), req.prompt.as_deref()) {
        (Some(image), Some(prompt)) if !image.is_empty() && !prompt.is_empty() => (image, prompt),
        _ => {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "Image and prompt are required"
            )))
        }
    };
    let mime_type = req.mime_type.as_deref().unwrap_or("image/jpeg");

    let text = state
        .gateway
        .describe_image(image, prompt, mime_type)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Vision analysis failed");
            AppError::upstream("Vision analysis failed", e)
        })?;

    Ok(Json(TextResponse { text }))
}

pub async fn generate_image(
    State(state): State<AppState>,
    Json(req): Json<ImageGenRequest>,
) -> Result<Json<ImageGenResponse>, AppError> {
    let prompt = required(&req.prompt, "Prompt is required")?;

    let image = state.gateway.generate_image(prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Image generation failed");
        AppError::upstream("Image generation failed", e)
    })?;

    Ok(Json(ImageGenResponse { image }))
}

pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = required(&req.query, "Query is required")?;

    let answer = state.gateway.search(query).await.map_err(|e| {
        tracing::error!(error = %e, "Search failed");
        AppError::upstream("Search failed", e)
    })?;

    Ok(Json(SearchResponse {
        text: answer.text,
        sources: answer.sources,
    }))
}
