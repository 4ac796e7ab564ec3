use crate::config::WebConfig;
use crate::handlers::{chat, home, imagine, search, vision};
use crate::services::StudioApi;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use time::Duration;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

/// Cap on vision uploads, matching the gateway's request body limit.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: WebConfig,
    pub api: Arc<dyn StudioApi>,
}

pub fn build_router(state: AppState) -> Router {
    // Panel state lives in the session; nothing is shared between sessions.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false) // Set to true in production with HTTPS
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health_check))
        .route("/chat", get(chat::chat_page))
        .route("/chat/messages", post(chat::send_message))
        .route("/vision", get(vision::vision_page))
        .route("/vision/analyze", post(vision::analyze))
        .route("/imagine", get(imagine::imagine_page))
        .route("/imagine/generate", post(imagine::generate))
        .route("/search", get(search::search_page))
        .route("/search/run", post(search::run_search))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .with_state(state)
}

/// Resolves on SIGTERM or Ctrl+C so in-flight requests can drain.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
