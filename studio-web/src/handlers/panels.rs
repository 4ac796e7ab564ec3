//! Session plumbing shared by the panels.
//!
//! Each panel keeps its local state under its own session keys; switching
//! modes drops the departed panel's keys, so panel history resets on
//! leave/return. Errors are reported through a one-shot flash message that
//! the shared layout renders the same way for every panel.

use crate::models::{ChatMessage, GalleryImage, Mode, SearchOutcome, VisionOutcome};
use tower_sessions::Session;

const ACTIVE_MODE_KEY: &str = "active_mode";
const FLASH_ERROR_KEY: &str = "flash_error";
const CHAT_HISTORY_KEY: &str = "chat_history";
const VISION_RESULT_KEY: &str = "vision_result";
const GALLERY_KEY: &str = "gallery";
const SEARCH_RESULT_KEY: &str = "search_result";

fn state_keys(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Home => &[],
        Mode::Chat => &[CHAT_HISTORY_KEY],
        Mode::Vision => &[VISION_RESULT_KEY],
        Mode::ImageGen => &[GALLERY_KEY],
        Mode::Search => &[SEARCH_RESULT_KEY],
    }
}

/// Record `mode` as active, dropping the departed panel's state.
pub async fn enter_mode(session: &Session, mode: Mode) {
    let previous: Option<Mode> = session.get(ACTIVE_MODE_KEY).await.unwrap_or(None);

    if previous != Some(mode) {
        if let Some(prev) = previous {
            for key in state_keys(prev) {
                let _ = session.remove::<serde_json::Value>(key).await;
            }
        }
        session.insert(ACTIVE_MODE_KEY, mode).await.unwrap();
    }
}

/// Store a one-shot error message for the next page render.
pub async fn set_flash(session: &Session, message: impl Into<String>) {
    session.insert(FLASH_ERROR_KEY, message.into()).await.unwrap();
}

/// Consume the pending error message, if any.
pub async fn take_flash(session: &Session) -> Option<String> {
    session.remove(FLASH_ERROR_KEY).await.unwrap_or(None)
}

pub async fn chat_history(session: &Session) -> Vec<ChatMessage> {
    session
        .get(CHAT_HISTORY_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default()
}

pub async fn save_chat_history(session: &Session, history: &Vec<ChatMessage>) {
    session.insert(CHAT_HISTORY_KEY, history).await.unwrap();
}

pub async fn vision_result(session: &Session) -> Option<VisionOutcome> {
    session.get(VISION_RESULT_KEY).await.unwrap_or(None)
}

pub async fn save_vision_result(session: &Session, outcome: &VisionOutcome) {
    session.insert(VISION_RESULT_KEY, outcome).await.unwrap();
}

pub async fn gallery(session: &Session) -> Vec<GalleryImage> {
    session
        .get(GALLERY_KEY)
        .await
        .unwrap_or(None)
        .unwrap_or_default()
}

pub async fn save_gallery(session: &Session, gallery: &Vec<GalleryImage>) {
    session.insert(GALLERY_KEY, gallery).await.unwrap();
}

pub async fn search_result(session: &Session) -> Option<SearchOutcome> {
    session.get(SEARCH_RESULT_KEY).await.unwrap_or(None)
}

pub async fn save_search_result(session: &Session, outcome: &SearchOutcome) {
    session.insert(SEARCH_RESULT_KEY, outcome).await.unwrap();
}
