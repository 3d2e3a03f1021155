//! # User Identifiers
//!
//! Newtype wrappers for the two ways a user is named:
//!
//! - [`Email`] — the unique lookup key, and the subject of issued tokens.
//! - [`UserId`] — the surrogate primary key of a credential record.
//!
//! ## Normalization
//!
//! `Email` is an opaque key. Construction checks the `local@domain` shape
//! and rejects whitespace, but it does not lowercase or trim. Two addresses
//! that differ only in case are different keys unless the credential store
//! decides otherwise.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum length of an address, per RFC 5321 path limits.
const MAX_EMAIL_LEN: usize = 254;

/// A validated, email-shaped user identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and wrap an email address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] if the value is empty,
    /// longer than 254 bytes, contains whitespace or control characters,
    /// or is not exactly one `@` separating a non-empty local part from a
    /// domain containing at least one interior dot.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_email_shaped(&value) {
            return Err(ValidationError::InvalidEmail(value));
        }
        Ok(Self(value))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_email_shaped(value: &str) -> bool {
    if value.is_empty() || value.len() > MAX_EMAIL_LEN {
        return false;
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // The domain needs a dot with labels on both sides: "a.b".
    match domain.find('.') {
        Some(pos) => pos > 0 && !domain.ends_with('.') && !domain.contains(".."),
        None => false,
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::str::FromStr for Email {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Surrogate key of a credential record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}
