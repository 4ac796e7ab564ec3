use crate::handlers::panels;
use crate::models::Mode;
use askama::Template;
use axum::response::IntoResponse;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub error: Option<String>,
}

pub async fn index(session: Session) -> impl IntoResponse {
    panels::enter_mode(&session, Mode::Home).await;
    HomeTemplate {
        error: panels::take_flash(&session).await,
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
