use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, session},
        user::repository::{self, Role},
    },
    types::Context,
};
use axum::http::StatusCode;
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let password_hash =
        password::hash(&payload.password).map_err(|_| response::Error::UnexpectedError)?;

    let user = repository::create(
        &ctx.db_conn.pool,
        repository::CreateUserPayload {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            password_hash,
            role: Role::User,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::EmailAlreadyInUse => response::Error::EmailAlreadyInUse,
        _ => response::Error::SignupFailed,
    })?;

    tracing::info!("New user signed up: {}", user.id);

    session::issue(&ctx, user, StatusCode::CREATED)
        .map(response::Success::SignedUp)
        .map_err(|_| response::Error::UnexpectedError)
}
