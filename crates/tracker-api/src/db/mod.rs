//! # Database Persistence Layer
//!
//! Optional Postgres backing for the credential store via SQLx.
//!
//! When `DATABASE_URL` is set the service keeps credential records in the
//! `users` table. When absent it runs with the in-memory store, which is
//! what development and the test suite use.

pub mod credentials;

use sqlx::postgres::{PgPool, PgPoolOptions};

pub use credentials::PgCredentialStore;

/// Connect to Postgres and run the embedded migrations.
///
/// Returns `None` if no URL is configured (in-memory mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool(url: Option<&str>) -> Result<Option<PgPool>, sqlx::Error> {
    let Some(url) = url else {
        tracing::warn!(
            "DATABASE_URL not set; using the in-memory credential store. \
             Registered users will not survive restarts."
        );
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}
