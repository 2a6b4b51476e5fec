use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use chrono::{Duration, Utc};

use rendermark_core::{AppConfig, RequestClass, SessionTtl};

use super::harness::{
    ADMIN_LOGIN, TestHarness, XHR, body_text, decode_json, get, header_value, test_config,
};
use crate::RequestClassifier;

#[tokio::test]
async fn expired_session_shows_login_on_next_page_load() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let account = harness.send(get("/my/account", Some(&cookie), &[])).await;
    assert_eq!(account.status(), StatusCode::OK);
    let html = body_text(account).await;
    assert!(html.contains("form--field-container"));
    assert!(html.contains(ADMIN_LOGIN));

    harness.expire(&cookie).await;

    let landing = harness.send(get("/", Some(&cookie), &[])).await;
    assert_eq!(landing.status(), StatusCode::OK);
    let cleared = header_value(landing.headers(), "set-cookie").expect("cleared cookie");
    assert!(cleared.contains("Max-Age=0"));
    let html = body_text(landing).await;
    assert!(html.contains("action-login"));
    assert!(!html.contains("action-logout"));

    let account = harness.send(get("/my/account", Some(&cookie), &[])).await;
    assert_eq!(account.status(), StatusCode::SEE_OTHER);
    assert_eq!(header_value(account.headers(), "location"), Some("/login"));
}

#[tokio::test]
async fn expired_session_answers_api_requests_with_unauthorized() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    let loaded = harness
        .send(get("/api/v3/documents/1", Some(&cookie), &[XHR]))
        .await;
    assert_eq!(loaded.status(), StatusCode::OK);
    let payload: serde_json::Value = decode_json(loaded).await;
    assert_eq!(payload["id"], 1);

    harness.expire(&cookie).await;

    let expired = harness
        .send(get("/api/v3/documents/1", Some(&cookie), &[XHR]))
        .await;
    assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(expired).await, "unauthorized");
    assert_eq!(harness.state.sessions.len().await, 0);
}

#[tokio::test]
async fn active_session_activity_slides_the_window() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;

    harness.idle_for(&cookie, Duration::minutes(9)).await;
    let before = Utc::now();
    let first = harness.send(get("/", Some(&cookie), &[])).await;
    assert!(body_text(first).await.contains("action-logout"));

    let refreshed = harness.stored_session(&cookie).await.record.updated_at;
    assert!(refreshed >= before, "activity must move updated_at forward");
    assert!(Utc::now().signed_duration_since(refreshed) < Duration::minutes(1));

    // Eighteen idle minutes since sign-in, nine since the last request.
    harness.idle_for(&cookie, Duration::minutes(9)).await;
    let second = harness
        .send(get("/api/v3/documents/2", Some(&cookie), &[XHR]))
        .await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(harness.state.sessions.len().await, 1);
}

#[tokio::test]
async fn abandoned_expired_sessions_are_swept_on_sign_in() {
    let harness = TestHarness::setup();
    let mut abandoned = Vec::new();
    for _ in 0..5 {
        abandoned.push(harness.login().await);
    }
    for cookie in &abandoned {
        harness.expire(cookie).await;
    }
    let anonymous = harness.send(get("/", None, &[])).await;
    assert_eq!(anonymous.status(), StatusCode::OK);
    assert_eq!(harness.state.sessions.len().await, 5);

    let cookie = harness.login().await;
    assert_eq!(harness.state.sessions.len().await, 1);
    harness.stored_session(&cookie).await;
}

#[tokio::test]
async fn disabled_ttl_keeps_idle_sessions() {
    let harness = TestHarness::with_config(AppConfig {
        session_ttl: SessionTtl {
            enabled: false,
            ..SessionTtl::enabled_minutes(10)
        },
        ..test_config()
    });
    let cookie = harness.login().await;
    harness.expire(&cookie).await;

    let response = harness
        .send(get("/api/v3/documents/1", Some(&cookie), &[XHR]))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_api_request_without_marker_is_treated_as_interactive() {
    let harness = TestHarness::setup();
    let cookie = harness.login().await;
    harness.expire(&cookie).await;

    let response = harness
        .send(get("/api/v3/documents/1", Some(&cookie), &[]))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload: serde_json::Value = decode_json(response).await;
    assert_eq!(payload["code"], "UNAUTHORIZED");
    assert_eq!(payload["operation"], "documents.load");
}

struct ApiKeyClassifier;

impl RequestClassifier for ApiKeyClassifier {
    fn classify(&self, headers: &HeaderMap) -> RequestClass {
        if headers.contains_key("x-api-key") {
            RequestClass::Programmatic
        } else {
            RequestClass::Interactive
        }
    }
}

#[tokio::test]
async fn injected_classifier_decides_the_response_shape() {
    let harness = TestHarness::with_classifier(Arc::new(ApiKeyClassifier));

    let xhr_cookie = harness.login().await;
    harness.expire(&xhr_cookie).await;
    let xhr_only = harness
        .send(get("/api/v3/documents/1", Some(&xhr_cookie), &[XHR]))
        .await;
    assert_eq!(xhr_only.status(), StatusCode::UNAUTHORIZED);
    let payload: serde_json::Value = decode_json(xhr_only).await;
    assert_eq!(payload["code"], "UNAUTHORIZED");

    let key_cookie = harness.login().await;
    harness.expire(&key_cookie).await;
    let keyed = harness
        .send(get("/api/v3/documents/1", Some(&key_cookie), &[("X-Api-Key", "k")]))
        .await;
    assert_eq!(keyed.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(keyed).await, "unauthorized");
}
