pub mod email;

use crate::{modules::user::repository::User, types::Context};
use std::sync::Arc;

pub mod types {
    use super::User;

    #[derive(Clone)]
    pub struct PasswordResetRequested {
        pub user: User,
        pub reset_url: String,
    }
}

#[derive(Clone)]
pub enum Notification {
    PasswordResetRequested(types::PasswordResetRequested),
}

impl Notification {
    pub fn password_reset_requested(user: User, reset_url: String) -> Self {
        Notification::PasswordResetRequested(types::PasswordResetRequested { user, reset_url })
    }
}

#[derive(Debug)]
pub enum Error {
    InvalidAddress,
    NotSent,
}

pub type Result<T> = std::result::Result<T, Error>;

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    email::send(ctx, notification).await
}
