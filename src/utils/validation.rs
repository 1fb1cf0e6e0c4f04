use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use validator::ValidationErrors;

pub fn into_response(errors: ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status": "fail",
            "message": first_message(&errors).unwrap_or_else(|| "Invalid input data".to_string()),
            "errors": errors,
        })),
    )
        .into_response()
}

fn first_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields.into_iter().find_map(|(_, errors)| {
        errors
            .iter()
            .find_map(|error| error.message.as_ref().map(|message| message.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::ValidationError;

    #[test]
    fn uses_the_first_field_message() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "password",
            ValidationError::new("length").with_message(Cow::from("Password too short")),
        );
        errors.add(
            "email",
            ValidationError::new("email").with_message(Cow::from("Invalid email address")),
        );

        assert_eq!(
            first_message(&errors),
            Some("Invalid email address".to_string())
        );
    }

    #[test]
    fn falls_back_when_no_message() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));

        assert_eq!(first_message(&errors), None);
    }
}
