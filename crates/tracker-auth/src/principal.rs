//! # Identities
//!
//! [`RequestIdentity`] is what the authorization gate establishes for one
//! request. [`Identity`] is the full user view produced by the resolver.
//! Both answer the questions routes ask through [`Principal`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracker_core::{CredentialRecord, Email, UserId};

/// What a route may ask of a caller, whichever form it arrives in.
pub trait Principal {
    /// The authenticated subject, if any.
    fn subject(&self) -> Option<&str>;

    fn is_authenticated(&self) -> bool {
        self.subject().is_some()
    }
}

/// Per-request identity context.
///
/// Set at most once per request. There is no third state: a bad token and
/// no token both yield `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestIdentity {
    #[default]
    Anonymous,
    Authenticated(String),
}

impl RequestIdentity {
    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self::Authenticated(subject.into())
    }
}

impl Principal for RequestIdentity {
    fn subject(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(subject) => Some(subject),
        }
    }
}

/// A registered user as seen by route handlers. Never carries the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<CredentialRecord> for Identity {
    fn from(record: CredentialRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            display_name: record.display_name,
            created_at: record.created_at,
        }
    }
}

impl Principal for Identity {
    fn subject(&self) -> Option<&str> {
        Some(self.email.as_str())
    }
}
