pub mod request {
    use crate::modules::auth::middleware::AdminAuth;

    pub struct Payload {
        pub id: String,
        pub auth: AdminAuth,
    }
}

pub mod response {
    use crate::utils::response;
    use axum::{http::StatusCode, response::IntoResponse};

    pub enum Success {
        UserDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserDeleted => StatusCode::NO_CONTENT.into_response(),
            }
        }
    }

    pub enum Error {
        UserNotFound,
        FailedToDeleteUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserNotFound => {
                    response::fail(StatusCode::NOT_FOUND, "No user found with that ID")
                }
                Self::FailedToDeleteUser => response::error("Failed to delete user"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
