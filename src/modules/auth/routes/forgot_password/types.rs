pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default)]
    pub struct Payload {
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Please provide a valid email"))]
        pub email: String,
    }
}

pub mod response {
    use crate::utils::{response, validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        TokenSent,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TokenSent => (
                    StatusCode::OK,
                    Json(json!({ "status": "success", "message": "Token sent to email!" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        UserNotFound,
        FailedToFetchUser,
        FailedToSendEmail,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::UserNotFound => response::fail(
                    StatusCode::NOT_FOUND,
                    "There is no user with that email address.",
                ),
                Self::FailedToFetchUser => response::error("Failed to fetch user"),
                Self::FailedToSendEmail => {
                    response::error("There was an error sending the email. Try again later!")
                }
                Self::UnexpectedError => response::error("Sorry an error occurred"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
