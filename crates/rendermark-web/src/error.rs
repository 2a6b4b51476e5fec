use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use rendermark_core::RenderError;

#[expect(
    clippy::needless_pass_by_value,
    reason = "handlers naturally own error values from `Result` and pass them through"
)]
pub fn render_error_response(err: RenderError, operation: &str) -> Response {
    let status = status_for_render_error(&err);
    (status, Json(err.to_payload(operation))).into_response()
}

pub fn unauthorized_response(operation: &str) -> Response {
    render_error_response(
        RenderError::Unauthorized("sign in to use the API".to_string()),
        operation,
    )
}

fn status_for_render_error(err: &RenderError) -> StatusCode {
    match err {
        RenderError::Validation(_) => StatusCode::BAD_REQUEST,
        RenderError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        RenderError::NotFound(_) => StatusCode::NOT_FOUND,
        RenderError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
            StatusCode::NOT_FOUND
        }
        RenderError::Io(_) | RenderError::Json(_) | RenderError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
