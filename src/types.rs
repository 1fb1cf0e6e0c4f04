pub use crate::utils::database;
use crate::modules::auth::service::token;
use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, EncodingKey};
use lettre::{AsyncSmtpTransport, Tokio1Executor};
use std::{env, fmt};

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
    pub url: String,
    pub cors_origin: String,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for client addresses.
    pub trust_proxy: bool,
}

#[derive(Clone)]
pub struct JwtContext {
    pub encoding_key: EncodingKey,
    pub decoding_key: DecodingKey,
    pub expires_in: chrono::Duration,
    pub cookie_expires_in_days: i64,
}

impl JwtContext {
    pub fn new(secret: &str, expires_in: chrono::Duration, cookie_expires_in_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
            cookie_expires_in_days,
        }
    }
}

/// Outgoing mail. Without a transport, messages are written to the log.
#[derive(Clone)]
pub struct MailContext {
    pub sender: String,
    pub transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub jwt: JwtContext,
    pub mail: MailContext,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u16,
    pub url: String,
    pub cors_origin: String,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for client addresses.
    pub trust_proxy: bool,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expires_in: chrono::Duration,
    pub cookie_expires_in_days: i64,
}

#[derive(Clone)]
pub struct MailConfig {
    pub sender: String,
    pub uri: Option<String>,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub jwt: JwtConfig,
    pub mail: MailConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "{} not set", key),
            Self::Invalid(key, value) => write!(f, "Invalid value for {}: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn optional(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let host = optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let environment =
            AppEnvironment::from(optional("APP_ENV").unwrap_or_else(|| "development".to_string()));
        let raw_port = optional("PORT").unwrap_or_else(|| "5000".to_string());
        let port = raw_port
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("PORT", raw_port.clone()))?;
        let url = optional("APP_URL").unwrap_or_else(|| format!("http://{}:{}", host, port));
        let cors_origin =
            optional("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());
        let trust_proxy = match optional("TRUST_PROXY").as_deref() {
            None | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => return Err(ConfigError::Invalid("TRUST_PROXY", other.to_string())),
        };

        let jwt_secret = required("JWT_SECRET")?;
        let raw_expires_in = optional("JWT_EXPIRES_IN").unwrap_or_else(|| "90d".to_string());
        let jwt_expires_in = token::parse_duration(&raw_expires_in)
            .ok_or_else(|| ConfigError::Invalid("JWT_EXPIRES_IN", raw_expires_in.clone()))?;
        let raw_cookie_expires_in =
            optional("JWT_COOKIE_EXPIRES_IN").unwrap_or_else(|| "90".to_string());
        let jwt_cookie_expires_in_days = raw_cookie_expires_in
            .parse::<i64>()
            .map_err(|_| ConfigError::Invalid("JWT_COOKIE_EXPIRES_IN", raw_cookie_expires_in.clone()))?;

        let mail_sender = optional("MAIL_SENDER")
            .unwrap_or_else(|| "Restaurant <noreply@restaurant.local>".to_string());
        let mail_uri = optional("MAIL_URI");
        if mail_uri.is_none() && environment.is_production() {
            return Err(ConfigError::Missing("MAIL_URI"));
        }

        Ok(Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment,
                port,
                url,
                cors_origin,
                trust_proxy,
            },
            jwt: JwtConfig {
                secret: jwt_secret,
                expires_in: jwt_expires_in,
                cookie_expires_in_days: jwt_cookie_expires_in_days,
            },
            mail: MailConfig {
                sender: mail_sender,
                uri: mail_uri,
            },
        })
    }
}

#[derive(Debug)]
pub enum ContextError {
    Database(sqlx::Error),
    Migration(sqlx::migrate::MigrateError),
    Mail(lettre::transport::smtp::Error),
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(err) => write!(f, "Failed to connect to database: {}", err),
            Self::Migration(err) => write!(f, "Failed to run database migrations: {}", err),
            Self::Mail(err) => write!(f, "Invalid mail uri: {}", err),
        }
    }
}

impl std::error::Error for ContextError {}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, ContextError>;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, ContextError> {
        let db_conn = database::connect(
            self.database.url.as_str(),
            &database::RetryPolicy::default(),
        )
        .await
        .map_err(ContextError::Database)?;
        database::migrate(&db_conn)
            .await
            .map_err(ContextError::Migration)?;

        let transport = match self.mail.uri {
            Some(uri) => Some(
                AsyncSmtpTransport::<Tokio1Executor>::from_url(&uri)
                    .map_err(ContextError::Mail)?
                    .build(),
            ),
            None => {
                tracing::warn!("MAIL_URI not set, emails will be logged instead of sent");
                None
            }
        };

        Ok(Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
                cors_origin: self.app.cors_origin,
                trust_proxy: self.app.trust_proxy,
            },
            db_conn,
            jwt: JwtContext::new(
                &self.jwt.secret,
                self.jwt.expires_in,
                self.jwt.cookie_expires_in_days,
            ),
            mail: MailContext {
                sender: self.mail.sender,
                transport,
            },
        })
    }
}
