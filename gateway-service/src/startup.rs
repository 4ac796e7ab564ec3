//! Application startup and lifecycle management.

use crate::config::GatewayConfig;
use crate::handlers;
use crate::services::gateway::gemini::{GeminiClient, GeminiSettings};
use crate::services::GenerativeGateway;
use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use studio_core::error::AppError;
use studio_core::middleware::rate_limit::{create_ip_rate_limiter, ip_rate_limit_middleware};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub gateway: Arc<dyn GenerativeGateway>,
    pub started_at: Instant,
}

/// Build the router with all cross-cutting policy applied.
///
/// The rate limiter is scoped to the AI routes; `/health` stays reachable
/// for probes even when a client has exhausted its window.
pub fn build_router(state: AppState) -> Router {
    let limiter = create_ip_rate_limiter(
        state.config.limits.rate_limit_requests,
        state.config.limits.rate_limit_window_secs,
    );

    let api_routes = Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/vision", post(handlers::vision))
        .route("/api/image", post(handlers::generate_image))
        .route("/api/search", post(handlers::search))
        .layer(from_fn_with_state(limiter, ip_rate_limit_middleware));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(api_routes)
        .layer(DefaultBodyLimit::max(state.config.limits.max_body_bytes))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        )
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

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Constructs the Gemini client and binds the listener (port 0 = random
    /// port for testing).
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let gateway: Arc<dyn GenerativeGateway> = Arc::new(GeminiClient::new(GeminiSettings {
            api_key: config.google.api_key.clone(),
            text_model: config.models.text_model.clone(),
            image_model: config.models.image_model.clone(),
            request_timeout_secs: config.google.request_timeout_secs,
        }));

        tracing::info!(
            text_model = %config.models.text_model,
            image_model = %config.models.image_model,
            "Initialized Gemini gateway client"
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState {
            config,
            gateway,
            started_at: Instant::now(),
        };

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives, letting in-flight
    /// requests finish.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = build_router(self.state);

        axum::serve(
            self.listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
    }
}
