mod forgot_password;
mod login;
mod logout;
mod reset_password;
mod sign_up;
pub mod update_password;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(sign_up::get_router())
        .merge(login::get_router())
        .merge(logout::get_router())
        .merge(forgot_password::get_router())
        .merge(reset_password::get_router())
        .merge(update_password::get_router())
}
