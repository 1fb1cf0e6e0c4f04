use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::deactivate_by_id(&ctx.db_conn.pool, &payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToDeleteAccount)?;

    tracing::info!("User {} deactivated their account", payload.auth.user.id);

    Ok(response::Success::AccountDeleted)
}
