use super::response;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// `axum::Json` whose rejections use the API's `fail` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonError))]
pub struct Json<T>(pub T);

#[derive(Debug)]
pub struct JsonError(JsonRejection);

impl From<JsonRejection> for JsonError {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection)
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected request body: {}", self.0.body_text());

        match self.0 {
            JsonRejection::JsonDataError(_) => {
                response::fail(StatusCode::BAD_REQUEST, "Invalid input data")
            }
            JsonRejection::JsonSyntaxError(_) => {
                response::fail(StatusCode::BAD_REQUEST, "Request body is not valid JSON")
            }
            JsonRejection::MissingJsonContentType(_) => response::fail(
                StatusCode::BAD_REQUEST,
                "Expected request with `Content-Type: application/json`",
            ),
            rejection if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                response::fail(StatusCode::PAYLOAD_TOO_LARGE, "Request body is too large")
            }
            _ => response::fail(StatusCode::BAD_REQUEST, "Invalid request body"),
        }
    }
}
