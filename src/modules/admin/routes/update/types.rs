pub mod request {
    use crate::modules::user::repository::Role;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate, Default)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Body {
        #[validate(length(min = 1, message = "Please tell us your name!"))]
        pub name: Option<String>,
        #[validate(email(code = "INVALID_USER_EMAIL", message = "Please provide a valid email"))]
        pub email: Option<String>,
        pub role: Option<Role>,
        pub password: Option<serde_json::Value>,
        pub password_confirm: Option<serde_json::Value>,
    }

    impl Body {
        pub fn has_password_fields(&self) -> bool {
            self.password.is_some() || self.password_confirm.is_some()
        }
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::user::repository::User;
    use crate::utils::{response, validation};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        UserUpdated(User),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserUpdated(user) => (
                    StatusCode::OK,
                    Json(json!({ "status": "success", "data": { "user": user } })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        PasswordUpdateNotAllowed,
        FailedToValidate(ValidationErrors),
        EmailAlreadyInUse,
        UserNotFound,
        FailedToUpdateUser,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PasswordUpdateNotAllowed => response::fail(
                    StatusCode::BAD_REQUEST,
                    "This route is not for password updates. Please use /updateMyPassword.",
                ),
                Self::FailedToValidate(errors) => validation::into_response(errors),
                Self::EmailAlreadyInUse => {
                    response::fail(StatusCode::BAD_REQUEST, "Email already in use")
                }
                Self::UserNotFound => {
                    response::fail(StatusCode::NOT_FOUND, "No user found with that ID")
                }
                Self::FailedToUpdateUser => response::error("Failed to update user"),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

#[cfg(test)]
mod tests {
    use super::request::Body;
    use crate::modules::user::repository::Role;

    #[test]
    fn parses_role_changes() {
        let body: Body = serde_json::from_str(r#"{"role":"admin"}"#).unwrap();
        assert_eq!(body.role, Some(Role::Admin));
        assert!(!body.has_password_fields());
    }

    #[test]
    fn rejects_unknown_roles() {
        assert!(serde_json::from_str::<Body>(r#"{"role":"superuser"}"#).is_err());
    }
}
