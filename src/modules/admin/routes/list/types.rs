pub mod request {
    use crate::utils::pagination::Pagination;

    pub struct Payload {
        pub pagination: Pagination,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    use crate::{
        modules::user::repository::User,
        utils::{pagination::Paginated, response},
    };

    pub enum Success {
        PaginatedUsers(Paginated<User>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PaginatedUsers(users) => (
                    StatusCode::OK,
                    Json(json!({
                        "status": "success",
                        "results": users.items.len(),
                        "data": { "users": users.items },
                        "meta": users.meta,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchUsers,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchUsers => response::error("Failed to fetch users"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
