//! Shared helpers for studio-web panel tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use studio_web::config::{GatewaySettings, WebConfig};
use studio_web::models::{ChatMessage, SearchOutcome, SourceRef};
use studio_web::services::{ApiError, StudioApi};
use studio_web::startup::{build_router, AppState};
use tower::util::ServiceExt;

/// API stub that records invocations and serves canned results.
pub struct StubApi {
    calls: AtomicUsize,
    last_history_len: Mutex<Option<usize>>,
    chat_reply: String,
    vision_reply: String,
    image_reply: Option<String>,
    search_reply: SearchOutcome,
    fail: bool,
}

impl Default for StubApi {
    fn default() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_history_len: Mutex::new(None),
            chat_reply: "stub chat reply".to_string(),
            vision_reply: "stub analysis".to_string(),
            image_reply: Some("data:image/png;base64,c3R1Yg==".to_string()),
            search_reply: SearchOutcome {
                text: "stub answer".to_string(),
                sources: Vec::new(),
            },
            fail: false,
        }
    }
}

impl StubApi {
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

    pub fn with_search_reply(mut self, text: &str, sources: Vec<SourceRef>) -> Self {
        self.search_reply = SearchOutcome {
            text: text.to_string(),
            sources,
        };
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_history_len(&self) -> Option<usize> {
        *self.last_history_len.lock().unwrap()
    }

    fn check_fail(&self) -> Result<(), ApiError> {
        if self.fail {
            Err(ApiError::Service {
                status: 500,
                message: "Chat generation failed".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StudioApi for StubApi {
    async fn chat(&self, _message: &str, history: &[ChatMessage]) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_history_len.lock().unwrap() = Some(history.len());
        self.check_fail()?;
        Ok(self.chat_reply.clone())
    }

    async fn vision(
        &self,
        _image_base64: &str,
        _prompt: &str,
        _mime_type: &str,
    ) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.vision_reply.clone())
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Option<String>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.image_reply.clone())
    }

    async fn search(&self, _query: &str) -> Result<SearchOutcome, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check_fail()?;
        Ok(self.search_reply.clone())
    }
}

pub fn build_app(api: Arc<StubApi>) -> Router {
    build_router(AppState {
        config: WebConfig {
            port: 0,
            gateway: GatewaySettings {
                base_url: "http://localhost:0".to_string(),
            },
        },
        api,
    })
}

/// Response parts the panel tests care about.
pub struct PageResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub cookie: Option<String>,
    pub body: String,
}

async fn send(app: &Router, request: Request<Body>) -> PageResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8_lossy(&bytes).to_string();

    PageResponse {
        status,
        location,
        cookie,
        body,
    }
}

pub async fn get_page(app: &Router, path: &str, cookie: Option<&str>) -> PageResponse {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn post_form(
    app: &Router,
    path: &str,
    form_body: &str,
    cookie: Option<&str>,
) -> PageResponse {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    send(app, builder.body(Body::from(form_body.to_string())).unwrap()).await
}

pub async fn post_multipart(
    app: &Router,
    path: &str,
    parts: &[(&str, Option<(&str, &str)>, &[u8])],
    cookie: Option<&str>,
) -> PageResponse {
    let boundary = "test-boundary";
    let mut body: Vec<u8> = Vec::new();

    for (name, file, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match file {
            Some((filename, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    send(app, builder.body(Body::from(body)).unwrap()).await
}
