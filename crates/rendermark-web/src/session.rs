use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use rendermark_core::{ExpiredResponse, SessionDecision, SessionExpiryPolicy, SessionRecord};

use crate::WebState;

pub const SESSION_COOKIE_NAME: &str = "_rendermark_session";

const EXPIRED_SESSION_COOKIE: &str =
    "_rendermark_session=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub login: String,
    pub record: SessionRecord,
}

/// In-memory session table keyed by the cookie value.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl SessionStore {
    pub async fn create(&self, login: &str, now: DateTime<Utc>) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let session = StoredSession {
            login: login.to_string(),
            record: SessionRecord::new(now),
        };
        self.inner.write().await.insert(id.clone(), session);
        id
    }

    pub async fn get(&self, id: &str) -> Option<StoredSession> {
        self.inner.read().await.get(id).cloned()
    }

    /// Moves the last-activity timestamp; returns false for unknown ids.
    pub async fn set_updated_at(&self, id: &str, updated_at: DateTime<Utc>) -> bool {
        match self.inner.write().await.get_mut(id) {
            Some(session) => {
                session.record.updated_at = updated_at;
                true
            }
            None => false,
        }
    }

    pub async fn remove(&self, id: &str) -> Option<StoredSession> {
        self.inner.write().await.remove(id)
    }

    /// Drops every session `policy` reports as expired at `now`; returns how many went.
    pub async fn prune_expired(&self, policy: &SessionExpiryPolicy, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !policy.is_expired(&session.record, now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Who the current request acts as, attached by the session middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CurrentUser {
    Anonymous,
    SignedIn { login: String, session_id: String },
}

impl CurrentUser {
    pub(crate) fn login(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::SignedIn { login, .. } => Some(login),
        }
    }
}

pub(crate) fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn session_set_cookie(id: &str) -> String {
    format!("{SESSION_COOKIE_NAME}={id}; Path=/; HttpOnly; SameSite=Lax")
}

pub(crate) fn expired_session_cookie() -> HeaderValue {
    HeaderValue::from_static(EXPIRED_SESSION_COOKIE)
}

/// Enforces the session TTL before any handler runs.
///
/// A live session is refreshed. An expired one is dropped from the store;
/// programmatic requests then stop with `401 unauthorized`, interactive
/// requests continue anonymously.
pub(crate) async fn session_ttl_middleware(
    State(state): State<WebState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(session_id) = session_cookie(request.headers()) else {
        request.extensions_mut().insert(CurrentUser::Anonymous);
        return next.run(request).await;
    };
    let Some(stored) = state.sessions.get(&session_id).await else {
        request.extensions_mut().insert(CurrentUser::Anonymous);
        return next.run(request).await;
    };

    let now = Utc::now();
    let class = state.classifier.classify(request.headers());
    match state.policy.decide(&stored.record, now, class) {
        SessionDecision::Active => {
            state.sessions.set_updated_at(&session_id, now).await;
            request.extensions_mut().insert(CurrentUser::SignedIn {
                login: stored.login,
                session_id,
            });
            next.run(request).await
        }
        SessionDecision::Expired(outcome) => {
            state.sessions.remove(&session_id).await;
            tracing::info!(
                login = %stored.login,
                request_class = ?class,
                idle_minutes = now.signed_duration_since(stored.record.updated_at).num_minutes(),
                "session expired"
            );
            let mut response = match outcome {
                ExpiredResponse::Unauthorized => {
                    (StatusCode::UNAUTHORIZED, "unauthorized").into_response()
                }
                ExpiredResponse::LoginLanding => {
                    request.extensions_mut().insert(CurrentUser::Anonymous);
                    next.run(request).await
                }
            };
            response
                .headers_mut()
                .append(header::SET_COOKIE, expired_session_cookie());
            response
        }
    }
}
