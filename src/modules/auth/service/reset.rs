use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{Duration, NaiveDateTime, Utc};
use sha2::{Digest, Sha256};

pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// The plain token goes to the user; only `digest` is stored.
#[derive(Debug, Clone)]
pub struct ResetToken {
    pub plain: String,
    pub digest: String,
    pub expires_at: NaiveDateTime,
}

pub fn generate() -> ResetToken {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    let plain = hex::encode(bytes);

    ResetToken {
        digest: digest(&plain),
        plain,
        expires_at: (Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES)).naive_utc(),
    }
}

pub fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
