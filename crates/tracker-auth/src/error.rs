//! # Auth Error Types
//!
//! One enum per operation family. Login failures are deliberately coarse;
//! token failures are deliberately precise.

use thiserror::Error;

/// Failure to mint or verify a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Tokens must name a subject.
    #[error("token subject must not be empty")]
    EmptySubject,

    /// The signature does not match the process signing secret.
    #[error("token signature is invalid")]
    InvalidSignature,

    /// The expiry is at or before the verification time.
    #[error("token has expired")]
    Expired,

    /// The token could not be parsed into header, claims and signature.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Encoding failed while minting.
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed(err.to_string()),
        }
    }
}

/// Failure in the credential store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not complete the operation.
    #[error("credential store failure: {0}")]
    Backend(String),
}

/// Failure to hash a password or configure the hasher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// Argon2 cost parameters were rejected.
    #[error("invalid argon2 parameters: {0}")]
    Params(String),

    /// Hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Failure of a login attempt.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown identifier or wrong secret. The two are never distinguished.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The credential store failed; no verdict was reached.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Minting the token failed after the credentials checked out.
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Failure to resolve a subject to a full identity.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No credential record matches the subject.
    #[error("identity not found: {0}")]
    IdentityNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authentication_failed_message_is_cause_free() {
        let msg = AuthError::AuthenticationFailed.to_string();
        assert_eq!(msg, "authentication failed");
        assert!(!msg.contains("password"));
        assert!(!msg.contains("unknown"));
    }

    #[test]
    fn store_error_is_transparent_in_auth_error() {
        let err = AuthError::from(StoreError::Backend("pool closed".into()));
        assert!(err.to_string().contains("pool closed"));
    }

    #[test]
    fn identity_not_found_names_subject() {
        let err = ResolveError::IdentityNotFound("auth@user.in".into());
        assert!(err.to_string().contains("auth@user.in"));
    }

    #[test]
    fn jwt_signature_error_maps_to_invalid_signature() {
        let err = jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::InvalidSignature,
        );
        assert_eq!(TokenError::from(err), TokenError::InvalidSignature);
    }

    #[test]
    fn jwt_structural_error_maps_to_malformed() {
        let err = jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidToken);
        assert!(matches!(TokenError::from(err), TokenError::Malformed(_)));
    }
}
