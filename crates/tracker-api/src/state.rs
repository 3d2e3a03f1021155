//! # Application State
//!
//! Shared state for the Axum application, passed to route handlers via the
//! `State` extractor, plus the startup configuration it is built from.
//!
//! Every component is immutable after construction and shared by `Arc`;
//! cloning the state is cheap and never copies the signing secret.

use std::sync::Arc;

use thiserror::Error;
use tracker_auth::{
    Authenticator, CredentialStore, IdentityResolver, PasswordError, PasswordScheme,
    SigningSecret, TokenCodec,
};

/// Default HTTP port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Startup configuration problems. Reported once by `main`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("PORT is not a valid port number: {0:?}")]
    InvalidPort(String),
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Application configuration, read once at startup.
///
/// Custom `Debug` redacts the signing secret.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// HMAC key for minting and verifying tokens.
    pub signing_secret: SigningSecret,
    /// Postgres URL. `None` runs with the in-memory credential store.
    pub database_url: Option<String>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Configuration with defaults for everything but the secret.
    pub fn new(signing_secret: SigningSecret) -> Self {
        Self {
            port: DEFAULT_PORT,
            signing_secret,
            database_url: None,
            log_format: LogFormat::default(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_secret = lookup("JWT_SECRET")
            .and_then(SigningSecret::new)
            .ok_or(ConfigError::MissingSecret)?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let log_format = match lookup("LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            port,
            signing_secret,
            database_url,
            log_format,
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("signing_secret", &"[REDACTED]")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub codec: Arc<TokenCodec>,
    pub passwords: Arc<PasswordScheme>,
    pub store: Arc<dyn CredentialStore>,
    pub authenticator: Authenticator,
    pub resolver: IdentityResolver,
}

impl AppState {
    /// Build state with the recommended Argon2 cost.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, PasswordError> {
        Ok(Self::with_password_scheme(
            config,
            store,
            PasswordScheme::recommended()?,
        ))
    }

    /// Build state with an explicit password scheme. Tests use a cheap one.
    pub fn with_password_scheme(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
        passwords: PasswordScheme,
    ) -> Self {
        let codec = Arc::new(TokenCodec::new(&config.signing_secret));
        let passwords = Arc::new(passwords);
        let authenticator =
            Authenticator::new(Arc::clone(&store), Arc::clone(&codec), Arc::clone(&passwords));
        let resolver = IdentityResolver::new(Arc::clone(&store));
        Self {
            config,
            codec,
            passwords,
            store,
            authenticator,
            resolver,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("passwords", &self.passwords)
            .finish_non_exhaustive()
    }
}
