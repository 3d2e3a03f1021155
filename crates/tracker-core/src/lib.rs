//! # tracker-core — Foundational Types for the Tracker Backend
//!
//! Leaf crate of the workspace. Defines the identity primitives shared by
//! the auth core and the HTTP service.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `Email` and `UserId` are
//!    validated newtypes. No bare strings cross crate boundaries as lookup
//!    keys.
//!
//! 2. **Secrets never print.** `PasswordDigest` redacts itself in `Debug`,
//!    so a credential record can be logged without leaking the digest.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tracker-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod record;

pub use error::ValidationError;
pub use identity::{Email, UserId};
pub use record::{CredentialRecord, PasswordDigest};
