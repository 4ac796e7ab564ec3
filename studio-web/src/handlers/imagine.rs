use crate::handlers::panels;
use crate::models::{GalleryImage, Mode};
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "imagine.html")]
pub struct ImagineTemplate {
    pub gallery: Vec<GalleryImage>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct ImagineForm {
    pub prompt: String,
}

pub async fn imagine_page(session: Session) -> impl IntoResponse {
    panels::enter_mode(&session, Mode::ImageGen).await;
    ImagineTemplate {
        gallery: panels::gallery(&session).await,
        error: panels::take_flash(&session).await,
    }
}

pub async fn generate(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ImagineForm>,
) -> Redirect {
    let prompt = form.prompt.trim().to_string();
    if prompt.is_empty() {
        return Redirect::to("/imagine");
    }

    match state.api.generate_image(&prompt).await {
        Ok(Some(url)) => {
            let mut gallery = panels::gallery(&session).await;
            // Newest first.
            gallery.insert(
                0,
                GalleryImage {
                    prompt,
                    url,
                    created_at: Utc::now(),
                },
            );
            panels::save_gallery(&session, &gallery).await;
        }
        Ok(None) => {
            panels::set_flash(&session, "No image was produced for this prompt. Please try again.")
                .await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Image generation request failed");
            panels::set_flash(&session, e.to_string()).await;
        }
    }

    Redirect::to("/imagine")
}
