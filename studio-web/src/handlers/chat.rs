use crate::handlers::panels;
use crate::models::{ChatMessage, Mode};
use crate::startup::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

/// Greeting seeded into an empty conversation.
const WELCOME_MESSAGE: &str = "Hello! I am powered by Gemini 2.5 Flash. I can help you with \
     writing, reasoning, coding, and more. How can I assist you today?";

#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatTemplate {
    pub messages: Vec<ChatMessage>,
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatForm {
    pub message: String,
}

pub async fn chat_page(session: Session) -> impl IntoResponse {
    panels::enter_mode(&session, Mode::Chat).await;

    let mut messages = panels::chat_history(&session).await;
    if messages.is_empty() {
        messages.push(ChatMessage::model(WELCOME_MESSAGE));
        panels::save_chat_history(&session, &messages).await;
    }

    ChatTemplate {
        messages,
        error: panels::take_flash(&session).await,
    }
}

pub async fn send_message(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ChatForm>,
) -> Redirect {
    let message = form.message.trim().to_string();
    if message.is_empty() {
        return Redirect::to("/chat");
    }

    let mut messages = panels::chat_history(&session).await;
    let prior = messages.clone();

    // The user turn stays even when the backend call fails.
    messages.push(ChatMessage::user(message.as_str()));

    match state.api.chat(&message, &prior).await {
        Ok(text) => messages.push(ChatMessage::model(text)),
        Err(e) => {
            tracing::error!(error = %e, "Chat request failed");
            panels::set_flash(&session, e.to_string()).await;
        }
    }

    panels::save_chat_history(&session, &messages).await;
    Redirect::to("/chat")
}
