use chrono::{Duration, Utc};
use jsonwebtoken::{errors::ErrorKind, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::types::JwtContext;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    Invalid,
    Expired,
    SigningFailed,
}

pub fn sign(jwt: &JwtContext, user_id: &str) -> Result<String, Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + jwt.expires_in).timestamp(),
    };

    jsonwebtoken::encode(&Header::default(), &claims, &jwt.encoding_key).map_err(|err| {
        tracing::error!("Failed to sign token for user {}: {}", user_id, err);
        Error::SigningFailed
    })
}

pub fn verify(jwt: &JwtContext, token: &str) -> Result<Claims, Error> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    jsonwebtoken::decode::<Claims>(token, &jwt.decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => Error::Expired,
            _ => Error::Invalid,
        })
}

/// Parses `"90d"`, `"12h"`, `"30m"`, `"45s"` or a bare number of seconds.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let unit_start = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (amount, unit) = raw.split_at(unit_start);
    let amount = amount.parse::<i64>().ok()?;

    match unit.trim() {
        "" | "s" => Some(Duration::seconds(amount)),
        "m" => Some(Duration::minutes(amount)),
        "h" => Some(Duration::hours(amount)),
        "d" => Some(Duration::days(amount)),
        _ => None,
    }
}
