use super::types::{request, response};
use crate::{
    modules::{auth::service::password, user::repository},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, body: request::Body) -> response::Response {
    body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let password_hash =
        password::hash(&body.password).map_err(|_| response::Error::UnexpectedError)?;

    let user = repository::create(
        &ctx.db_conn.pool,
        repository::CreateUserPayload {
            name: body.name.trim().to_string(),
            email: body.email.trim().to_string(),
            password_hash,
            role: body.role.unwrap_or_default(),
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::EmailAlreadyInUse => response::Error::EmailAlreadyInUse,
        _ => response::Error::FailedToCreateUser,
    })?;

    tracing::info!("Admin created user {} with role {:?}", user.id, user.role);

    Ok(response::Success::UserCreated(user))
}
