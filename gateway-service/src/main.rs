use gateway_service::config::GatewayConfig;
use gateway_service::startup::Application;
use studio_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("gateway-service", "info");

    let config = GatewayConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!("gateway-service listening on port {}", app.port());

    app.run_until_stopped().await
}
