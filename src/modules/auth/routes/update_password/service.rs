use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, session},
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

    let user = payload.auth.user;

    if !password::verify(&payload.body.password_current, &user.password) {
        return Err(response::Error::WrongCurrentPassword);
    }

    let password_hash =
        password::hash(&payload.body.password).map_err(|_| response::Error::UnexpectedError)?;

    let user = repository::update_password(&ctx.db_conn.pool, &user.id, password_hash)
        .await
        .map_err(|_| response::Error::FailedToUpdatePassword)?;

    session::issue(&ctx, user, StatusCode::OK)
        .map(response::Success::PasswordUpdated)
        .map_err(|_| response::Error::UnexpectedError)
}
