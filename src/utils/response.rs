use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Client errors are reported as `fail`, server errors as `error`.
pub fn fail(status: StatusCode, message: &str) -> Response {
    let kind = if status.is_server_error() {
        "error"
    } else {
        "fail"
    };

    (status, Json(json!({ "status": kind, "message": message }))).into_response()
}

pub fn error(message: &str) -> Response {
    fail(StatusCode::INTERNAL_SERVER_ERROR, message)
}
