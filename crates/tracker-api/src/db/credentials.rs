//! Credential persistence.
//!
//! [`PgCredentialStore`] implements [`CredentialStore`] over the `users`
//! table. Email is the unique key; `save` upserts on it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracker_auth::{CredentialStore, StoreError};
use tracker_core::{CredentialRecord, Email, PasswordDigest, UserId};
use uuid::Uuid;

/// Postgres-backed credential store. Cheap to clone; the pool is shared.
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<CredentialRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_digest, display_name, created_at
             FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(UserRow::into_record).transpose()
    }

    async fn save(&self, record: CredentialRecord) -> Result<CredentialRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, email, password_digest, display_name, created_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (email) DO UPDATE
                SET password_digest = EXCLUDED.password_digest,
                    display_name = EXCLUDED.display_name
             RETURNING id, email, password_digest, display_name, created_at",
        )
        .bind(record.id.as_uuid())
        .bind(record.email.as_str())
        .bind(record.password_digest.as_str())
        .bind(&record.display_name)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        row.into_record()
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_digest: String,
    display_name: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    /// A row whose email no longer validates is a data error, not a miss.
    fn into_record(self) -> Result<CredentialRecord, StoreError> {
        let email = Email::new(self.email).map_err(|e| {
            tracing::warn!(id = %self.id, error = %e, "stored email failed validation");
            StoreError::Backend(format!("corrupt user row {}: {e}", self.id))
        })?;
        Ok(CredentialRecord {
            id: UserId(self.id),
            email,
            password_digest: PasswordDigest::from_phc(self.password_digest),
            display_name: self.display_name,
            created_at: self.created_at,
        })
    }
}
