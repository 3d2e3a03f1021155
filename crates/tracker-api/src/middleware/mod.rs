//! # Middleware
//!
//! Tower layers applied around the API router. The authorization gate
//! lives in [`crate::auth`].

pub mod tracing_layer;
