use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, reset, session},
        user::repository,
    },
    types::Context,
};
use axum::http::StatusCode;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let password_hash =
        password::hash(&payload.body.password).map_err(|_| response::Error::UnexpectedError)?;

    let user = repository::reset_password_with_token(
        &ctx.db_conn.pool,
        &reset::digest(&payload.token),
        password_hash,
    )
    .await
    .map_err(|_| response::Error::FailedToResetPassword)?
    .ok_or(response::Error::InvalidOrExpiredToken)?;

    tracing::info!("Password reset for user {}", user.id);

    session::issue(&ctx, user, StatusCode::OK)
        .map(response::Success::PasswordReset)
        .map_err(|_| response::Error::UnexpectedError)
}
