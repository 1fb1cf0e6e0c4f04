use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde_json::json;

use super::{admin, auth, user};
use crate::{
    types::Context,
    utils::{database, response},
};
use std::sync::Arc;

async fn welcome() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "success", "message": "Welcome to the Restaurant API" })),
    )
}

async fn health_check(State(ctx): State<Arc<Context>>) -> axum::response::Response {
    if database::is_healthy(&ctx.db_conn).await {
        (
            StatusCode::OK,
            Json(json!({ "status": "success", "message": "OK" })),
        )
            .into_response()
    } else {
        tracing::warn!("Health check failed: database is unreachable");
        response::fail(StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
    }
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .nest("/auth", auth::get_router())
        .nest("/users", user::get_router())
        .nest("/admin", Router::new().nest("/users", admin::get_router()))
}
