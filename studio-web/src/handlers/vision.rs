use crate::handlers::panels;
use crate::models::{Mode, VisionOutcome};
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect},
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tower_sessions::Session;

/// Prompt sent when the user leaves the question empty.
const DEFAULT_PROMPT: &str = "Describe this image in detail.";

#[derive(Template)]
#[template(path = "vision.html")]
pub struct VisionTemplate {
    pub result: Option<VisionOutcome>,
    pub error: Option<String>,
}

pub async fn vision_page(session: Session) -> impl IntoResponse {
    panels::enter_mode(&session, Mode::Vision).await;
    VisionTemplate {
        result: panels::vision_result(&session).await,
        error: panels::take_flash(&session).await,
    }
}

pub async fn analyze(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Redirect {
    let mut image: Option<(Vec<u8>, String)> = None;
    let mut prompt = String::new();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().map(str::to_string);
                match name.as_deref() {
                    Some("image") => {
                        let mime_type = field
                            .content_type()
                            .unwrap_or("image/jpeg")
                            .to_string();
                        match field.bytes().await {
                            Ok(data) if !data.is_empty() => {
                                image = Some((data.to_vec(), mime_type))
                            }
                            Ok(_) => {}
                            Err(e) => {
                                tracing::error!(error = %e, "Failed to read uploaded image");
                                panels::set_flash(&session, "Failed to read the uploaded image.")
                                    .await;
                                return Redirect::to("/vision");
                            }
                        }
                    }
                    Some("prompt") => prompt = field.text().await.unwrap_or_default(),
                    _ => {}
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Malformed upload");
                panels::set_flash(&session, "Failed to read the uploaded image.").await;
                return Redirect::to("/vision");
            }
        }
    }

    let Some((bytes, mime_type)) = image else {
        panels::set_flash(&session, "Choose an image to analyze.").await;
        return Redirect::to("/vision");
    };

    let encoded = BASE64.encode(&bytes);
    let prompt = if prompt.trim().is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        prompt
    };

    match state.api.vision(&encoded, &prompt, &mime_type).await {
        Ok(text) => {
            let outcome = VisionOutcome {
                preview: format!("data:{};base64,{}", mime_type, encoded),
                text,
            };
            panels::save_vision_result(&session, &outcome).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Vision request failed");
            panels::set_flash(&session, e.to_string()).await;
        }
    }

    Redirect::to("/vision")
}
