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

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let (email, candidate) = match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(response::Error::MissingCredentials),
    };

    let user = repository::find_by_email(&ctx.db_conn.pool, email.trim())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .ok_or(response::Error::IncorrectCredentials)?;

    if !password::verify(&candidate, &user.password) {
        tracing::warn!("Failed login attempt for user {}", user.id);
        return Err(response::Error::IncorrectCredentials);
    }

    session::issue(&ctx, user, StatusCode::OK)
        .map(response::Success::LoggedIn)
        .map_err(|_| response::Error::UnexpectedError)
}
