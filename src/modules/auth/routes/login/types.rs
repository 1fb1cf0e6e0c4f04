pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub email: Option<String>,
        pub password: Option<String>,
    }
}

pub mod response {
    use crate::modules::auth::service::session::Session;
    use crate::utils::response;
    use axum::{http::StatusCode, response::IntoResponse};

    pub enum Success {
        LoggedIn(Session),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LoggedIn(session) => session.into_response(),
            }
        }
    }

    pub enum Error {
        MissingCredentials,
        IncorrectCredentials,
        FailedToFetchUser,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingCredentials => response::fail(
                    StatusCode::BAD_REQUEST,
                    "Please provide email and password!",
                ),
                Self::IncorrectCredentials => {
                    response::fail(StatusCode::UNAUTHORIZED, "Incorrect email or password")
                }
                Self::FailedToFetchUser => response::error("Failed to fetch user"),
                Self::UnexpectedError => response::error("Sorry an error occurred"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
