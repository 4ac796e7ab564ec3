use std::sync::Arc;
use studio_core::observability::init_tracing;
use studio_web::config::WebConfig;
use studio_web::services::GatewayClient;
use studio_web::startup::{build_router, shutdown_signal, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("studio-web", "info");

    let config = WebConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let api = Arc::new(GatewayClient::new(config.gateway.clone()));
    info!(gateway = %api.base_url(), "Initialized gateway API client");

    let app = build_router(AppState {
        config: config.clone(),
        api,
    });

    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting studio-web on {}", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            anyhow::anyhow!("Server error: {}", e)
        })?;

    Ok(())
}
