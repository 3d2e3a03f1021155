//! # tracker-auth — Stateless Authentication Core
//!
//! Everything needed to turn a login into a signed token and a signed token
//! back into a caller identity, with no server-side session state.
//!
//! ## Components
//!
//! - [`TokenCodec`] — mints and verifies HMAC-SHA256 JWTs. Pure; the
//!   signing secret is injected at construction.
//! - [`PasswordScheme`] — Argon2id hashing and constant-time verification.
//! - [`CredentialStore`] — async lookup/save of credential records by email.
//!   [`InMemoryCredentialStore`] is the default backend.
//! - [`Authenticator`] — login: store lookup, password check, token mint.
//! - [`IdentityResolver`] — maps a verified subject back to a full
//!   [`Identity`].
//!
//! ## Failure Surfaces
//!
//! Login failures collapse into [`AuthError::AuthenticationFailed`] whatever
//! the cause. Token failures keep their kind ([`TokenError::InvalidSignature`],
//! [`TokenError::Expired`], [`TokenError::Malformed`]) so callers and tests can
//! tell them apart, even though the HTTP gate treats all three as anonymous.
//!
//! ## Crate Policy
//!
//! - Depends only on `tracker-core` internally.
//! - Every shared component is `Send + Sync` and immutable after
//!   construction.

pub mod authenticator;
pub mod error;
pub mod password;
pub mod principal;
pub mod resolver;
pub mod secret;
pub mod store;
pub mod token;

pub use authenticator::Authenticator;
pub use error::{AuthError, PasswordError, ResolveError, StoreError, TokenError};
pub use password::PasswordScheme;
pub use principal::{Identity, Principal, RequestIdentity};
pub use resolver::IdentityResolver;
pub use secret::SigningSecret;
pub use store::{CredentialStore, InMemoryCredentialStore};
pub use token::{Claims, IssuedToken, Token, TokenCodec, TOKEN_VALIDITY};
