use serde::Deserialize;
use studio_core::config as core_config;
use studio_core::config::{get_env, Environment};
use studio_core::error::AppError;

/// Default cap on request bodies (10 MB), sized for base64 image payloads.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Default per-address quota: 100 requests per 15-minute window.
const DEFAULT_RATE_LIMIT_REQUESTS: u32 = 100;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
    pub limits: LimitConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model for chat, vision and grounded search (e.g. gemini-2.5-flash)
    pub text_model: String,
    /// Image-capable model variant (e.g. gemini-2.5-flash-image)
    pub image_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub api_key: String,
    /// Upper bound on a single round-trip to the Gemini API.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitConfig {
    pub rate_limit_requests: u32,
    pub rate_limit_window_secs: u64,
    pub max_body_bytes: usize,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = Environment::current().is_prod();

        Ok(GatewayConfig {
            common,
            models: ModelConfig {
                text_model: get_env("GATEWAY_TEXT_MODEL", Some("gemini-2.5-flash"), is_prod)?,
                image_model: get_env(
                    "GATEWAY_IMAGE_MODEL",
                    Some("gemini-2.5-flash-image"),
                    is_prod,
                )?,
            },
            google: GoogleConfig {
                api_key: get_env("GOOGLE_API_KEY", None, is_prod)?,
                request_timeout_secs: get_env("GATEWAY_REQUEST_TIMEOUT_SECS", Some("120"), is_prod)?
                    .parse()
                    .unwrap_or(120),
            },
            limits: LimitConfig {
                rate_limit_requests: get_env(
                    "GATEWAY_RATE_LIMIT_REQUESTS",
                    Some(&DEFAULT_RATE_LIMIT_REQUESTS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_RATE_LIMIT_REQUESTS),
                rate_limit_window_secs: get_env(
                    "GATEWAY_RATE_LIMIT_WINDOW_SECS",
                    Some(&DEFAULT_RATE_LIMIT_WINDOW_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_RATE_LIMIT_WINDOW_SECS),
                max_body_bytes: get_env(
                    "GATEWAY_MAX_BODY_BYTES",
                    Some(&DEFAULT_MAX_BODY_BYTES.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            },
        })
    }
}
