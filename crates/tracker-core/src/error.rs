//! # Validation Errors
//!
//! Errors raised when constructing domain values from untrusted input.

use thiserror::Error;

/// Rejection of an identifier or attribute at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The email address is not shaped like `local@domain`.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// The display name is empty or too long.
    #[error("invalid display name: {0}")]
    InvalidDisplayName(String),

    /// The password does not satisfy the registration policy.
    #[error("password rejected: {0}")]
    WeakPassword(String),
}
