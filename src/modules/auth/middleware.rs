use super::service::{session, token};
use crate::modules::user::repository::{self, Role, User};
use crate::types::Context;
use crate::utils::response;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{self, request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
pub enum Error {
    NotLoggedIn,
    InvalidToken,
    ExpiredToken,
    UserNoLongerExists,
    PasswordChanged,
    Forbidden,
    UnexpectedError,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::NotLoggedIn => response::fail(
                StatusCode::UNAUTHORIZED,
                "You are not logged in! Please log in to get access.",
            ),
            Self::InvalidToken => response::fail(
                StatusCode::UNAUTHORIZED,
                "Invalid token. Please log in again!",
            ),
            Self::ExpiredToken => response::fail(
                StatusCode::UNAUTHORIZED,
                "Your token has expired! Please log in again.",
            ),
            Self::UserNoLongerExists => response::fail(
                StatusCode::UNAUTHORIZED,
                "The user belonging to this token does no longer exist.",
            ),
            Self::PasswordChanged => response::fail(
                StatusCode::UNAUTHORIZED,
                "User recently changed password! Please log in again.",
            ),
            Self::Forbidden => response::fail(
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action",
            ),
            Self::UnexpectedError => response::error("Sorry an error occurred"),
        }
    }
}

fn get_token_from_header(header: &str) -> Option<String> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Bearer header first, then the session cookie.
fn get_token_from_request(parts: &Parts) -> Option<String> {
    let from_header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(get_token_from_header);

    from_header.or_else(|| {
        CookieJar::from_headers(&parts.headers)
            .get(session::COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| value != "loggedout")
    })
}

async fn get_user_from_request(ctx: &Context, parts: &Parts) -> Result<User, Error> {
    let token = get_token_from_request(parts).ok_or(Error::NotLoggedIn)?;

    let claims = token::verify(&ctx.jwt, &token).map_err(|err| match err {
        token::Error::Expired => Error::ExpiredToken,
        _ => Error::InvalidToken,
    })?;

    let user = repository::find_by_id(&ctx.db_conn.pool, &claims.sub)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::UserNoLongerExists)?;

    if user.changed_password_after(claims.iat) {
        return Err(Error::PasswordChanged);
    }

    Ok(user)
}

pub fn restrict_to(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

fn context_from_parts(parts: &Parts) -> Result<Arc<Context>, Error> {
    parts.extensions.get::<Arc<Context>>().cloned().ok_or_else(|| {
        tracing::error!("Context extension missing from request");
        Error::UnexpectedError
    })
}

#[derive(Serialize, Clone)]
pub struct Auth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let ctx = context_from_parts(parts)?;
        get_user_from_request(&ctx, parts)
            .await
            .map(|user| Self { user })
    }
}

#[derive(Serialize, Clone)]
pub struct AdminAuth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminAuth {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Auth { user } = Auth::from_request_parts(parts, state).await?;

        if !restrict_to(user.role, &[Role::Admin]) {
            tracing::warn!("User {} attempted to access an admin route", user.id);
            return Err(Error::Forbidden);
        }

        Ok(Self { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn reads_bearer_token() {
        let parts = parts(Request::builder().header("Authorization", "Bearer abc.def.ghi"));
        assert_eq!(get_token_from_request(&parts), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn ignores_other_schemes() {
        let parts = parts(Request::builder().header("Authorization", "Basic dXNlcjpwYXNz"));
        assert_eq!(get_token_from_request(&parts), None);
    }

    #[test]
    fn falls_back_to_cookie() {
        let parts = parts(Request::builder().header("Cookie", "theme=dark; jwt=abc.def.ghi"));
        assert_eq!(get_token_from_request(&parts), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn logged_out_cookie_is_no_token() {
        let parts = parts(Request::builder().header("Cookie", "jwt=loggedout"));
        assert_eq!(get_token_from_request(&parts), None);
    }

    #[test]
    fn admin_only_routes_reject_users() {
        assert!(restrict_to(Role::Admin, &[Role::Admin]));
        assert!(!restrict_to(Role::User, &[Role::Admin]));
        assert!(restrict_to(Role::User, &[Role::Admin, Role::User]));
    }

    #[test]
    fn forbidden_maps_to_403() {
        assert_eq!(Error::Forbidden.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(
            Error::PasswordChanged.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
