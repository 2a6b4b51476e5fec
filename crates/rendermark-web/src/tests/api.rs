use axum::http::StatusCode;
use serde_json::json;

use rendermark_core::InlineDisplay;

use super::harness::{TestHarness, XHR, decode_json, get, json_post};
use crate::dto::AttachmentClassification;

#[tokio::test]
async fn classify_endpoint_reports_registry_view_of_a_name() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let response = harness
        .send(get(
            "/api/v3/attachments/classify?name=Diagram.PNG&content_type=image/jpeg",
            Some(&cookie),
            &[XHR],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let classified: AttachmentClassification = decode_json(response).await;
    assert_eq!(classified.content_type.as_deref(), Some("image/png"));
    assert_eq!(classified.css_class.as_deref(), Some("image-png"));
    assert_eq!(classified.category.as_deref(), Some("image"));
    assert_eq!(classified.narrowed.as_deref(), Some("image/png"));
    assert_eq!(classified.inline, Some(InlineDisplay::Image));
}

#[tokio::test]
async fn classify_endpoint_rejects_blank_names() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let response = harness
        .send(get("/api/v3/attachments/classify?name=%20", Some(&cookie), &[XHR]))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn api_requires_a_session() {
    let harness = TestHarness::setup();
    let response = harness
        .send(get("/api/v3/attachments/classify?name=a.txt", None, &[XHR]))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["code"], "UNAUTHORIZED");
    assert!(payload["trace_id"].is_string());
}

#[tokio::test]
async fn render_absolutizes_links_against_request_host() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let response = harness
        .send(json_post(
            "/api/v3/render",
            Some(&cookie),
            &json!({
                "content": "[issue](/issues/1) [ext](http://other.org/x) [proto](//evil.example/x)",
                "only_path": false
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload: serde_json::Value = decode_json(response).await;
    let html = payload["html"].as_str().expect("html str");
    assert!(html.contains("href=\"https://example.org/issues/1\""));
    assert!(html.contains("href=\"http://other.org/x\""));
    assert!(!html.contains("evil.example"));
}

#[tokio::test]
async fn render_defaults_to_relative_links() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let response = harness
        .send(json_post(
            "/api/v3/render",
            Some(&cookie),
            &json!({ "content": "[issue](/issues/1)" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload: serde_json::Value = decode_json(response).await;
    let html = payload["html"].as_str().expect("html str");
    assert!(html.contains("href=\"/issues/1\""));
}

#[tokio::test]
async fn document_payload_carries_absolute_links_and_classified_attachments() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let response = harness
        .send(get(
            "/api/v3/documents/1",
            Some(&cookie),
            &[XHR, ("X-Forwarded-Proto", "https")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload: serde_json::Value = decode_json(response).await;

    let html = payload["description"]["html"].as_str().expect("html");
    assert!(html.contains("href=\"https://example.org/documents/2\""));
    assert!(html.contains("src=\"https://example.org/attachments/1/diagram.png\""));
    assert!(html.contains("href=\"https://example.com/changelog\""));

    let attachments = payload["attachments"].as_array().expect("attachments");
    assert_eq!(attachments.len(), 3);
    assert_eq!(attachments[0]["narrowed"], "image/png");
    assert_eq!(attachments[1]["content_type"], "application/x-gzip");
    assert_eq!(attachments[1]["narrowed"], "application/octet-stream");
    assert_eq!(attachments[2]["content_type"], "text/plain");
    assert_eq!(attachments[2]["inline"], "text");
}

#[tokio::test]
async fn unknown_document_is_not_found() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let response = harness
        .send(get("/api/v3/documents/99", Some(&cookie), &[XHR]))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["code"], "NOT_FOUND");
}

#[tokio::test]
async fn forged_forwarded_proto_cannot_smuggle_a_script_scheme() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let response = harness
        .send(get(
            "/api/v3/documents/2",
            Some(&cookie),
            &[XHR, ("X-Forwarded-Proto", "javascript")],
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload: serde_json::Value = decode_json(response).await;
    let html = payload["description"]["html"].as_str().expect("html");
    assert!(!html.contains("javascript"));
    assert!(html.contains("href=\"https://example.org/wiki/rollout\""));
}
