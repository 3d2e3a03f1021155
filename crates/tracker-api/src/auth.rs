//! # Authorization Gate
//!
//! Per-request middleware that turns an optional `Authorization: Bearer
//! <token>` header into a [`RequestIdentity`] stored in the request
//! extensions.
//!
//! The gate never rejects. A missing header, a non-Bearer scheme, and a
//! token that fails verification (bad signature, expired, malformed) all
//! leave the request anonymous and let it through. Routes that require a
//! caller take the [`Authenticated`] extractor, which is where the 401
//! comes from.
//!
//! The [`TokenCodec`] is injected via an `Extension` layer:
//!
//! ```ignore
//! Router::new()
//!     .route("/v1/session", get(handler))
//!     .layer(from_fn(authorization_gate))
//!     .layer(Extension(codec));
//! ```

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracker_auth::{RequestIdentity, TokenCodec};

use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from a `Bearer <token>` header value.
///
/// Returns `None` for any other scheme or an empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

/// Establish the request identity and pass the request on.
pub async fn authorization_gate(mut request: Request, next: Next) -> Response {
    if request.extensions().get::<RequestIdentity>().is_some() {
        return next.run(request).await;
    }

    let identity = identify(&request);
    request.extensions_mut().insert(identity);
    next.run(request).await
}

fn identify(request: &Request) -> RequestIdentity {
    let Some(codec) = request.extensions().get::<Arc<TokenCodec>>() else {
        tracing::warn!("authorization gate has no token codec; treating request as anonymous");
        return RequestIdentity::Anonymous;
    };

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);
    let Some(token) = token else {
        return RequestIdentity::Anonymous;
    };

    match codec.verify(token) {
        Ok(subject) => RequestIdentity::authenticated(subject),
        Err(err) => {
            tracing::debug!(reason = %err, "bearer token rejected; continuing anonymously");
            RequestIdentity::Anonymous
        }
    }
}

// -- Extractors ---------------------------------------------------------------

/// The request identity as established by the gate.
///
/// Never rejects: a request that did not pass through the gate is anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallerIdentity(pub RequestIdentity);

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for CallerIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<RequestIdentity>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

/// Subject of an authenticated caller. Rejects anonymous requests with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated(pub String);

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<RequestIdentity>() {
            Some(RequestIdentity::Authenticated(subject)) => Ok(Self(subject.clone())),
            _ => Err(AppError::Unauthorized("authentication required".into())),
        }
    }
}
