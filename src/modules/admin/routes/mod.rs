mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::types::Context;
use axum::routing::{get, Router};
use std::sync::Arc;

/// User management, rooted at whatever path the caller nests it under.
pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route(
            "/:id",
            get(get::handler)
                .patch(update::handler)
                .delete(delete::handler),
        )
}
