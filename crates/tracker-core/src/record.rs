//! # Credential Records
//!
//! The persisted form of a registered user as the auth core sees it.
//! Board, issue and sprint data never appear here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{Email, UserId};

/// Maximum display name length, in characters.
const MAX_DISPLAY_NAME: usize = 100;

/// A one-way password digest in PHC string format.
///
/// `Debug` prints a placeholder instead of the digest.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an already-computed PHC string.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// The PHC string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

/// A stored user credential.
///
/// Created on registration and read during authentication. The auth core
/// never mutates a record once saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: UserId,
    /// Unique lookup key and token subject.
    pub email: Email,
    pub password_digest: PasswordDigest,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Build a fresh record with a new id and the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDisplayName`] if the trimmed name
    /// is empty or longer than 100 characters.
    pub fn new(
        email: Email,
        password_digest: PasswordDigest,
        display_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let display_name = validate_display_name(display_name.into())?;
        Ok(Self {
            id: UserId::new(),
            email,
            password_digest,
            display_name,
            created_at: Utc::now(),
        })
    }
}

fn validate_display_name(name: String) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidDisplayName(
            "display name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME {
        return Err(ValidationError::InvalidDisplayName(format!(
            "display name must be at most {MAX_DISPLAY_NAME} characters"
        )));
    }
    Ok(trimmed.to_string())
}
