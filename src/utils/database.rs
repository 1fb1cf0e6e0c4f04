use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{fmt::Display, future::Future, time::Duration};

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

/// Fixed-delay retry used while the database is coming up.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            delay: Duration::from_secs(3),
        }
    }
}

pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < policy.max_retries => {
                tracing::error!(
                    "Connection attempt {}/{} failed: {}",
                    attempt,
                    policy.max_retries,
                    err
                );
                tracing::info!("Retrying in {} seconds...", policy.delay.as_secs());
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!(
                    "Connection attempt {}/{} failed, giving up: {}",
                    attempt,
                    policy.max_retries,
                    err
                );
                return Err(err);
            }
        }
    }
}

pub async fn connect(
    database_url: &str,
    policy: &RetryPolicy,
) -> Result<DatabaseConnection, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = retry(policy, |_| {
        PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
    })
    .await?;

    tracing::info!("Database connected successfully");

    Ok(DatabaseConnection { pool })
}

pub async fn migrate(db_conn: &DatabaseConnection) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(&db_conn.pool).await
}

pub async fn is_healthy(db_conn: &DatabaseConnection) -> bool {
    sqlx::query("SELECT 1").execute(&db_conn.pool).await.is_ok()
}
