pub mod request {
    use crate::modules::user::repository::Role;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Body {
        #[validate(length(min = 1, message = "Please tell us your name!"))]
        pub name: String,
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Please provide a valid email"))]
        pub email: String,
        #[validate(length(min = 8, message = "Password must have at least 8 characters"))]
        pub password: String,
        #[validate(must_match(other = "password", message = "Passwords are not the same!"))]
        pub password_confirm: String,
        pub role: Option<Role>,
    }
}

pub mod response {
    use crate::modules::user::repository::User;
    use crate::utils::{response, validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        UserCreated(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserCreated(user) => (
                    StatusCode::CREATED,
                    Json(json!({ "status": "success", "data": { "user": user } })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToValidate(ValidationErrors),
        EmailAlreadyInUse,
        FailedToCreateUser,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::EmailAlreadyInUse => {
                    response::fail(StatusCode::BAD_REQUEST, "Email already in use")
                }
                Self::FailedToCreateUser => response::error("Failed to create user"),
                Self::UnexpectedError => response::error("Sorry an error occurred"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
