use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{get, post},
};

use rendermark_core::{AppConfig, SessionExpiryPolicy};

mod classify;
mod documents;
mod dto;
mod error;
mod handlers;
mod html;
mod origin;
mod session;

#[cfg(test)]
mod tests;

pub use classify::{HeaderMarkerClassifier, RequestClassifier};
pub use dto::AttachmentClassification;
pub use session::{SESSION_COOKIE_NAME, SessionStore, StoredSession};

#[derive(Clone)]
pub struct WebState {
    pub(crate) config: Arc<AppConfig>,
    pub(crate) sessions: SessionStore,
    pub(crate) policy: SessionExpiryPolicy,
    pub(crate) classifier: Arc<dyn RequestClassifier>,
    pub(crate) documents: documents::DocumentStore,
}

impl WebState {
    /// Builds state from `config`, using its header marker to classify requests.
    ///
    /// # Errors
    /// Returns an error when the configured marker is not a valid header name.
    pub fn new(config: AppConfig) -> Result<Self> {
        let classifier = HeaderMarkerClassifier::from_marker(&config.programmatic_marker)
            .context("invalid programmatic request marker")?;
        Ok(Self {
            policy: SessionExpiryPolicy::new(config.session_ttl),
            config: Arc::new(config),
            sessions: SessionStore::default(),
            classifier: Arc::new(classifier),
            documents: documents::DocumentStore::seeded(),
        })
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn RequestClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

/// Start the web server and block until shutdown.
///
/// # Errors
/// Returns an error when the runtime cannot be created, the socket cannot be
/// bound, or the server exits with a runtime failure.
pub fn serve_web(config: AppConfig, host: &str, port: u16) -> Result<()> {
    let state = WebState::new(config)?;
    if state.config.admin.password.is_none() {
        tracing::warn!("no admin password configured; sign-in is disabled");
    }
    let bind_addr = format!("{host}:{port}");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build web runtime")?;

    tracing::info!(
        session_ttl_enabled = state.policy.ttl().enabled,
        session_ttl_minutes = state.policy.ttl().ttl.num_minutes(),
        "session policy loaded"
    );

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind web server at {bind_addr}"))?;
        tracing::info!("listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app_router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
            .context("web server failed")
    })
}

pub fn app_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/my/account", get(handlers::my_account))
        .route(
            "/api/v3/attachments/classify",
            get(handlers::classify_attachment),
        )
        .route("/api/v3/render", post(handlers::render_text))
        .route("/api/v3/documents/{id}", get(handlers::load_document))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session::session_ttl_middleware,
        ))
        .with_state(state)
}
