use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if payload.body.has_password_fields() {
        return Err(response::Error::PasswordUpdateNotAllowed);
    }

    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    // Only name and email are user-editable; role stays untouched.
    let update_payload = repository::UpdateUserPayload {
        name: payload.body.name.map(|name| name.trim().to_string()),
        email: payload.body.email.map(|email| email.trim().to_string()),
        role: None,
    };

    repository::update_by_id(&ctx.db_conn.pool, &payload.auth.user.id, update_payload)
        .await
        .map_err(|err| match err {
            repository::Error::EmailAlreadyInUse => response::Error::EmailAlreadyInUse,
            _ => response::Error::FailedToUpdateUser,
        })?
        .ok_or(response::Error::UserNotFound)
        .map(response::Success::UserUpdated)
}
