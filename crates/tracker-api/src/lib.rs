//! # tracker-api — HTTP Surface for the Tracker Backend
//!
//! Axum service around `tracker-auth`: login, registration, and identity
//! lookup, with a bearer-token authorization gate on every API route.
//!
//! ## Request Pipeline
//!
//! `TraceLayer` → authorization gate → handler. The gate never rejects;
//! it records a [`tracker_auth::RequestIdentity`] and lets each route
//! decide what an anonymous caller may do.
//!
//! ## Modules
//!
//! - [`auth`] — the gate and its extractors.
//! - [`routes`] — `sessions` and `users` handlers.
//! - [`state`] — configuration and shared state.
//! - [`db`] — optional Postgres credential store.
//! - [`error`] — `AppError` and its JSON error body.
//! - [`openapi`] — generated OpenAPI document.

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the gate.
pub fn app(state: AppState) -> Router {
    let codec = std::sync::Arc::clone(&state.codec);

    let api = Router::new()
        .merge(routes::sessions::router())
        .merge(routes::users::router())
        .merge(openapi::router())
        .layer(from_fn(auth::authorization_gate))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(codec))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe. 200 while the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe.
async fn readiness() -> &'static str {
    "ready"
}
