mod delete_me;
mod me;
mod update_me;

use crate::{modules::{admin, auth}, types::Context};
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(me::get_router())
        .merge(update_me::get_router())
        .merge(delete_me::get_router())
        .merge(auth::routes::update_password::get_router())
        .merge(admin::get_router())
}
