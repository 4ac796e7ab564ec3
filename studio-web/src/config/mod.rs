use serde::Deserialize;
use studio_core::config::{get_env, Environment};
use studio_core::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    pub port: u16,
    pub gateway: GatewaySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySettings {
    /// Base URL of the gateway-service the panels talk to.
    pub base_url: String,
}

impl WebConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let is_prod = Environment::current().is_prod();

        Ok(WebConfig {
            port: get_env("STUDIO_WEB_PORT", Some("8080"), is_prod)?
                .parse()
                .unwrap_or(8080),
            gateway: GatewaySettings {
                base_url: get_env(
                    "GATEWAY_SERVICE_URL",
                    Some("http://localhost:3000"),
                    is_prod,
                )?,
            },
        })
    }
}
