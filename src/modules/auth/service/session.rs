use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde_json::json;

use super::token;
use crate::{modules::user::repository::User, types::Context};

pub const COOKIE_NAME: &str = "jwt";

/// A freshly signed token for `user`, delivered in the body and as a cookie.
pub struct Session {
    pub status: StatusCode,
    pub token: String,
    pub user: User,
    cookie: Cookie<'static>,
}

pub fn issue(ctx: &Context, user: User, status: StatusCode) -> Result<Session, token::Error> {
    let token = token::sign(&ctx.jwt, &user.id)?;

    let cookie = Cookie::build((COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .secure(ctx.app.environment.is_production())
        .max_age(time::Duration::days(ctx.jwt.cookie_expires_in_days))
        .build();

    Ok(Session {
        status,
        token,
        user,
        cookie,
    })
}

/// Overwrites the session cookie with a short-lived placeholder.
pub fn logged_out_cookie() -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, "loggedout"))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(10))
        .build()
}

impl IntoResponse for Session {
    fn into_response(self) -> Response {
        (
            self.status,
            CookieJar::new().add(self.cookie),
            Json(json!({
                "status": "success",
                "token": self.token,
                "data": { "user": self.user },
            })),
        )
            .into_response()
    }
}
