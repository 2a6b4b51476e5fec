use axum::{
    Extension, Form, Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Utc;

use rendermark_core::RenderError;
use rendermark_core::markdown::render_markdown_html;

use crate::WebState;
use crate::dto::{
    AttachmentClassification, ClassifyQuery, DocumentResponse, FormattedText, LoginForm,
    RenderRequest, RenderResponse,
};
use crate::error::{render_error_response, unauthorized_response};
use crate::html;
use crate::origin::render_context;
use crate::session::{CurrentUser, expired_session_cookie, session_set_cookie};

pub(crate) async fn index(Extension(user): Extension<CurrentUser>) -> Html<String> {
    Html(html::landing_page(&user))
}

pub(crate) async fn login_page() -> Html<String> {
    Html(html::login_page(None))
}

pub(crate) async fn login(State(state): State<WebState>, Form(form): Form<LoginForm>) -> Response {
    let admin = &state.config.admin;
    let accepted = admin.password.as_deref().is_some_and(|password| {
        form.login.trim() == admin.login && form.password == password
    });
    if !accepted {
        tracing::info!(login = %form.login.trim(), "rejected sign-in");
        return (
            StatusCode::UNAUTHORIZED,
            Html(html::login_page(Some("Invalid user or password"))),
        )
            .into_response();
    }

    let now = Utc::now();
    let pruned = state.sessions.prune_expired(&state.policy, now).await;
    if pruned > 0 {
        tracing::debug!(pruned, "dropped expired sessions");
    }
    let session_id = state.sessions.create(&admin.login, now).await;
    tracing::info!(login = %admin.login, "signed in");
    (
        [(header::SET_COOKIE, session_set_cookie(&session_id))],
        Redirect::to("/my/account"),
    )
        .into_response()
}

pub(crate) async fn logout(
    State(state): State<WebState>,
    Extension(user): Extension<CurrentUser>,
) -> Response {
    if let CurrentUser::SignedIn { session_id, .. } = &user {
        state.sessions.remove(session_id).await;
    }
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}

pub(crate) async fn my_account(Extension(user): Extension<CurrentUser>) -> Response {
    match user.login() {
        Some(login) => Html(html::account_page(&user, login)).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

pub(crate) async fn classify_attachment(
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ClassifyQuery>,
) -> Response {
    const OPERATION: &str = "attachments.classify";
    if user.login().is_none() {
        return unauthorized_response(OPERATION);
    }
    if query.name.trim().is_empty() {
        return render_error_response(
            RenderError::Validation("attachment name must not be empty".to_string()),
            OPERATION,
        );
    }
    let classification = AttachmentClassification::classify(
        query.name.trim(),
        query.content_type.as_deref().map(str::trim),
    );
    (StatusCode::OK, Json(classification)).into_response()
}

pub(crate) async fn render_text(
    State(state): State<WebState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
    Json(request): Json<RenderRequest>,
) -> Response {
    if user.login().is_none() {
        return unauthorized_response("text.render");
    }
    let context = render_context(&headers, &state.config.url_options, request.only_path);
    let html = render_markdown_html(&request.content, &context);
    (StatusCode::OK, Json(RenderResponse { html })).into_response()
}

pub(crate) async fn load_document(
    State(state): State<WebState>,
    Extension(user): Extension<CurrentUser>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Response {
    const OPERATION: &str = "documents.load";
    if user.login().is_none() {
        return unauthorized_response(OPERATION);
    }
    let Some(document) = state.documents.get(id) else {
        return render_error_response(RenderError::NotFound(format!("document {id}")), OPERATION);
    };

    // API payloads leave the page, so their links must be absolute.
    let context = render_context(&headers, &state.config.url_options, false);
    let response = DocumentResponse {
        id: document.id,
        subject: document.subject.clone(),
        description: FormattedText {
            raw: document.description.clone(),
            html: render_markdown_html(&document.description, &context),
        },
        attachments: document
            .attachments
            .iter()
            .map(|attachment| {
                AttachmentClassification::classify(
                    &attachment.file_name,
                    attachment.declared_content_type.as_deref(),
                )
            })
            .collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}
