use super::service::service;
use super::types::request;
use crate::{modules::auth::middleware::AdminAuth, types::Context, utils::extract::Json};
use axum::{extract::State, response::IntoResponse};
use std::sync::Arc;

pub async fn handler(
    _: AdminAuth,
    State(ctx): State<Arc<Context>>,
    Json(body): Json<request::Body>,
) -> impl IntoResponse {
    service(ctx, body).await
}
