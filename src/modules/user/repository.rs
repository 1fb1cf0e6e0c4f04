use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

use crate::utils::pagination::{Paginated, Pagination};

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    #[serde(skip)]
    pub active: bool,
    #[serde(skip)]
    pub password_changed_at: Option<NaiveDateTime>,
    #[serde(skip)]
    pub password_reset_token: Option<String>,
    #[serde(skip)]
    pub password_reset_expires: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    /// Whether the password was changed after a token issued at `issued_at` (unix seconds).
    pub fn changed_password_after(&self, issued_at: i64) -> bool {
        match self.password_changed_at {
            Some(changed_at) => changed_at.and_utc().timestamp() > issued_at,
            None => false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    EmailAlreadyInUse,
    UnexpectedError,
}

fn map_write_error(err: sqlx::Error, context: &str) -> Error {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return Error::EmailAlreadyInUse;
        }
    }

    tracing::error!("Error occurred while {}: {}", context, err);
    Error::UnexpectedError
}

pub struct CreateUserPayload {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateUserPayload) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (id, name, email, password, role)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.name)
    .bind(payload.email.to_lowercase())
    .bind(payload.password_hash)
    .bind(payload.role)
    .fetch_one(e)
    .await
    .map_err(|err| map_write_error(err, "creating a user account"))
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND active = TRUE")
        .bind(id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(e: E, email: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1 AND active = TRUE")
        .bind(email.to_lowercase())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_email: {}", err);
            Error::UnexpectedError
        })
}

/// Sets a new password for the owner of a still-valid reset token and consumes
/// the token in the same statement. `None` when no unexpired token matches, so
/// a token can only ever be redeemed once.
pub async fn reset_password_with_token<'e, E: PgExecutor<'e>>(
    e: E,
    token_digest: &str,
    password_hash: String,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            password = $1,
            password_changed_at = NOW() AT TIME ZONE 'UTC' - INTERVAL '1 second',
            password_reset_token = NULL,
            password_reset_expires = NULL,
            updated_at = NOW() AT TIME ZONE 'UTC'
        WHERE
            password_reset_token = $2
            AND password_reset_expires > NOW() AT TIME ZONE 'UTC'
            AND active = TRUE
        RETURNING *
        ",
    )
    .bind(password_hash)
    .bind(token_digest)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred in reset_password_with_token: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_many<'e, E>(e: E, pagination: &Pagination) -> Result<Paginated<User>>
where
    E: PgExecutor<'e> + Copy,
{
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM users WHERE active = TRUE")
        .fetch_one(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while counting users: {}", err);
            Error::UnexpectedError
        })?;

    let users = sqlx::query_as::<_, User>(
        "
        SELECT * FROM users
        WHERE active = TRUE
        ORDER BY created_at DESC, id
        LIMIT $1
        OFFSET $2
        ",
    )
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch many users: {}", err);
        Error::UnexpectedError
    })?;

    Ok(Paginated::new(users, total as u32, pagination))
}

#[derive(Default)]
pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
    payload: UpdateUserPayload,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            name = COALESCE($1, name),
            email = COALESCE($2, email),
            role = COALESCE($3, role),
            updated_at = NOW() AT TIME ZONE 'UTC'
        WHERE
            id = $4
            AND active = TRUE
        RETURNING *
        ",
    )
    .bind(payload.name)
    .bind(payload.email.map(|email| email.to_lowercase()))
    .bind(payload.role)
    .bind(id)
    .fetch_optional(e)
    .await
    .map_err(|err| map_write_error(err, &format!("updating user with id {}", id)))
}

/// Replaces the password hash and consumes any outstanding reset token.
pub async fn update_password<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
    password_hash: String,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            password = $1,
            password_changed_at = NOW() AT TIME ZONE 'UTC' - INTERVAL '1 second',
            password_reset_token = NULL,
            password_reset_expires = NULL,
            updated_at = NOW() AT TIME ZONE 'UTC'
        WHERE
            id = $2
        RETURNING *
        ",
    )
    .bind(password_hash)
    .bind(id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating the password of user with id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn set_password_reset<'e, E: PgExecutor<'e>>(
    e: E,
    id: &str,
    token_digest: &str,
    expires_at: NaiveDateTime,
) -> Result<()> {
    sqlx::query(
        "
        UPDATE users SET
            password_reset_token = $1,
            password_reset_expires = $2
        WHERE
            id = $3
        ",
    )
    .bind(token_digest)
    .bind(expires_at)
    .bind(id)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while storing a password reset for user with id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn clear_password_reset<'e, E: PgExecutor<'e>>(e: E, id: &str) -> Result<()> {
    sqlx::query(
        "
        UPDATE users SET
            password_reset_token = NULL,
            password_reset_expires = NULL
        WHERE
            id = $1
        ",
    )
    .bind(id)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while clearing the password reset for user with id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn deactivate_by_id<'e, E: PgExecutor<'e>>(e: E, id: &str) -> Result<()> {
    sqlx::query("UPDATE users SET active = FALSE, updated_at = NOW() AT TIME ZONE 'UTC' WHERE id = $1")
        .bind(id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while deactivating user with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

/// Returns `false` when no active user had that id.
pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: &str) -> Result<bool> {
    sqlx::query("DELETE FROM users WHERE id = $1 AND active = TRUE")
        .bind(id)
        .execute(e)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Error occurred while deleting user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}
