use super::types::{request, response};
use crate::{
    modules::{auth::service::reset, notification, user::repository},
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let user = repository::find_by_email(&ctx.db_conn.pool, payload.email.trim())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .ok_or(response::Error::UserNotFound)?;

    let token = reset::generate();

    repository::set_password_reset(&ctx.db_conn.pool, &user.id, &token.digest, token.expires_at)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let reset_url = format!(
        "{}/api/auth/resetPassword/{}",
        ctx.app.url.trim_end_matches('/'),
        token.plain
    );

    let user_id = user.id.clone();
    if notification::send(
        ctx.clone(),
        notification::Notification::password_reset_requested(user, reset_url),
    )
    .await
    .is_err()
    {
        // An unsent token must not stay redeemable.
        if repository::clear_password_reset(&ctx.db_conn.pool, &user_id)
            .await
            .is_err()
        {
            tracing::error!(
                "Reset token for user {} is still stored after the email failed",
                user_id
            );
        }
        return Err(response::Error::FailedToSendEmail);
    }

    Ok(response::Success::TokenSent)
}
