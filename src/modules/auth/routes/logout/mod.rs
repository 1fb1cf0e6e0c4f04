use crate::{modules::auth::service::session, types::Context};
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, Router},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;

async fn handler(jar: CookieJar) -> impl IntoResponse {
    (
        StatusCode::OK,
        jar.add(session::logged_out_cookie()),
        Json(json!({ "status": "success" })),
    )
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new().route("/logout", get(handler))
}
