//! Shared helpers for gateway-service integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use gateway_service::config::{GatewayConfig, GoogleConfig, LimitConfig, ModelConfig};
use gateway_service::services::gateway::{
    ChatTurn, GatewayError, GenerativeGateway, GroundedAnswer, SourceLink,
};
use gateway_service::startup::{build_router, AppState};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tower::util::ServiceExt;

/// Gateway stub that records invocations and serves canned results.
pub struct StubGateway {
    chat_calls: AtomicUsize,
    vision_calls: AtomicUsize,
    image_calls: AtomicUsize,
    search_calls: AtomicUsize,
    chat_reply: String,
    vision_reply: String,
    image_reply: Option<String>,
    search_reply: GroundedAnswer,
    fail: bool,
}

impl Default for StubGateway {
    fn default() -> Self {
        Self {
            chat_calls: AtomicUsize::new(0),
            vision_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            chat_reply: "stub chat reply".to_string(),
            vision_reply: "stub analysis".to_string(),
            image_reply: None,
            search_reply: GroundedAnswer {
                text: "stub answer".to_string(),
                sources: Vec::new(),
            },
            fail: false,
        }
    }
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat_reply(mut self, reply: &str) -> Self {
        self.chat_reply = reply.to_string();
        self
    }

    pub fn with_vision_reply(mut self, reply: &str) -> Self {
        self.vision_reply = reply.to_string();
        self
    }

    pub fn with_image_reply(mut self, reply: Option<&str>) -> Self {
        self.image_reply = reply.map(str::to_string);
        self
    }

    pub fn with_search_reply(mut self, text: &str, sources: Vec<SourceLink>) -> Self {
        self.search_reply = GroundedAnswer {
            text: text.to_string(),
            sources,
        };
        self
    }

    /// Every operation fails with an API error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
            + self.vision_calls.load(Ordering::SeqCst)
            + self.image_calls.load(Ordering::SeqCst)
            + self.search_calls.load(Ordering::SeqCst)
    }

    fn check_fail(&self) -> Result<(), GatewayError> {
        if self.fail {
            Err(GatewayError::ApiError("upstream exploded".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GenerativeGateway for StubGateway {
    async fn chat(&self, _message: &str, _history: &[ChatTurn]) -> Result<String, GatewayError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.chat_reply.clone())
    }

    async fn describe_image(
        &self,
        _image_base64: &str,
        _prompt: &str,
        _mime_type: &str,
    ) -> Result<String, GatewayError> {
        self.vision_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.vision_reply.clone())
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Option<String>, GatewayError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.image_reply.clone())
    }

    async fn search(&self, _query: &str) -> Result<GroundedAnswer, GatewayError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.search_reply.clone())
    }
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        common: studio_core::config::Config { port: 0 },
        models: ModelConfig {
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
        },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
            request_timeout_secs: 120,
        },
        limits: LimitConfig {
            rate_limit_requests: 100,
            rate_limit_window_secs: 900,
            max_body_bytes: 10 * 1024 * 1024,
        },
    }
}

pub fn build_app(gateway: Arc<StubGateway>) -> Router {
    build_app_with_config(gateway, test_config())
}

pub fn build_app_with_config(gateway: Arc<StubGateway>, config: GatewayConfig) -> Router {
    build_router(AppState {
        config,
        gateway,
        started_at: Instant::now(),
    })
}

/// POST a JSON body and return status plus parsed response body.
pub async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}
