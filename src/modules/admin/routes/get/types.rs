pub mod request {
    pub struct Payload {
        pub id: String,
    }
}

pub mod response {
    use crate::modules::user::repository::User;
    use crate::utils::response;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        User(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::User(user) => (
                    StatusCode::OK,
                    Json(json!({ "status": "success", "data": { "user": user } })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        UserNotFound,
        FailedToFetchUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserNotFound => {
                    response::fail(StatusCode::NOT_FOUND, "No user found with that ID")
                }
                Self::FailedToFetchUser => response::error("Failed to fetch user"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
