//! # API Route Modules
//!
//! - `sessions` — login and the request-identity probe.
//! - `users` — registration, the caller's own record, identity lookup.

pub mod sessions;
pub mod users;
