mod common;

use axum::http::StatusCode;
use common::{build_app, post_json, StubGateway};
use gateway_service::services::gateway::SourceLink;
use std::sync::Arc;

#[tokio::test]
async fn search_returns_answer_with_sources_in_provider_order() {
    let sources = vec![
        SourceLink {
            title: "Zeta News".to_string(),
            uri: "https://zeta.example/story".to_string(),
        },
        SourceLink {
            title: "Alpha Wire".to_string(),
            uri: "https://alpha.example/report".to_string(),
        },
    ];
    let stub = Arc::new(StubGateway::new().with_search_reply("the answer", sources));
    let app = build_app(stub.clone());

    let (status, body) = post_json(
        &app,
        "/api/search",
        serde_json::json!({"query": "who won?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "the answer");
    // Provider ranking order must survive the round-trip untouched.
    assert_eq!(body["sources"][0]["title"], "Zeta News");
    assert_eq!(body["sources"][1]["title"], "Alpha Wire");
}

#[tokio::test]
async fn search_with_no_sources_returns_empty_list() {
    let stub = Arc::new(StubGateway::new().with_search_reply("nothing cited", Vec::new()));
    let app = build_app(stub);

    let (status, body) = post_json(
        &app,
        "/api/search",
        serde_json::json!({"query": "who won?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sources"], serde_json::json!([]));
}

#[tokio::test]
async fn search_missing_query_is_rejected_before_the_gateway() {
    let stub = Arc::new(StubGateway::new());
    let app = build_app(stub.clone());

    let (status, body) = post_json(&app, "/api/search", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Query is required");
    assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn search_downstream_fault_yields_error_envelope() {
    let stub = Arc::new(StubGateway::new().failing());
    let app = build_app(stub);

    let (status, body) = post_json(
        &app,
        "/api/search",
        serde_json::json!({"query": "who won?"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Search failed");
}
