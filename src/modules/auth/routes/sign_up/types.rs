pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Payload {
        #[validate(length(min = 1, message = "Please tell us your name!"))]
        pub name: String,
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Please provide a valid email"))]
        pub email: String,
        #[validate(length(min = 8, message = "Password must have at least 8 characters"))]
        pub password: String,
        #[validate(must_match(other = "password", message = "Passwords are not the same!"))]
        pub password_confirm: String,
    }
}

pub mod response {
    use crate::modules::auth::service::session::Session;
    use crate::utils::{response, validation};
    use axum::{http::StatusCode, response::IntoResponse};
    use validator::ValidationErrors;

    pub enum Success {
        SignedUp(Session),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::SignedUp(session) => session.into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        EmailAlreadyInUse,
        SignupFailed,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::EmailAlreadyInUse => {
                    response::fail(StatusCode::BAD_REQUEST, "Email already in use")
                }
                Self::SignupFailed => response::error("Sign up failed!"),
                Self::UnexpectedError => response::error("Sorry an error occurred"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
