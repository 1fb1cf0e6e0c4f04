pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Body {
        #[validate(length(min = 8, message = "Password must have at least 8 characters"))]
        pub password: String,
        #[validate(must_match(other = "password", message = "Passwords are not the same!"))]
        pub password_confirm: String,
    }

    pub struct Payload {
        pub token: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::auth::service::session::Session;
    use crate::utils::{response, validation};
    use axum::{http::StatusCode, response::IntoResponse};
    use validator::ValidationErrors;

    pub enum Success {
        PasswordReset(Session),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PasswordReset(session) => session.into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        InvalidOrExpiredToken,
        FailedToResetPassword,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::InvalidOrExpiredToken => {
                    response::fail(StatusCode::BAD_REQUEST, "Token is invalid or has expired")
                }
                Self::FailedToResetPassword => response::error("Failed to reset password"),
                Self::UnexpectedError => response::error("Sorry an error occurred"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
