//! # Session Routes
//!
//! - `POST /v1/login` exchanges credentials for a bearer token, returned in
//!   the `Authorization` response header.
//! - `GET /v1/session` reports what the authorization gate made of the
//!   caller's header.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracker_auth::Principal;
use utoipa::ToSchema;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::auth::CallerIdentity;
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Login credentials. The password is wiped from memory on drop.
#[derive(Deserialize, ToSchema, Zeroize, ZeroizeOnDrop)]
pub struct LoginRequest {
    /// Login identifier (the account email).
    #[serde(alias = "identifier")]
    pub email: String,
    #[serde(alias = "secret")]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login. The token itself travels in the `Authorization` header.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub subject: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Request identity as seen by the server.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub subject: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/login", post(login))
        .route("/v1/session", get(session))
}

/// POST /v1/login — Authenticate and issue a bearer token.
#[utoipa::path(
    post,
    path = "/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; token in the Authorization header", body = LoginResponse,
            headers(("Authorization" = String, description = "Bearer <token>"))),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
    ),
    tag = "sessions"
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<LoginResponse>), AppError> {
    let req = extract_json(body)?;
    let issued = state
        .authenticator
        .authenticate(&req.email, &req.password)
        .await?;

    let mut value = HeaderValue::try_from(format!("Bearer {}", issued.token.as_str()))
        .map_err(|e| AppError::Internal(format!("token is not a valid header value: {e}")))?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, value);

    let (Some(issued_at), Some(expires_at)) =
        (issued.claims.issued_at(), issued.claims.expires_at())
    else {
        return Err(AppError::Internal("token timestamps out of range".into()));
    };

    Ok((
        headers,
        Json(LoginResponse {
            subject: issued.claims.sub.clone(),
            token_type: "Bearer".to_string(),
            issued_at,
            expires_at,
        }),
    ))
}

/// GET /v1/session — Report the caller's request identity.
#[utoipa::path(
    get,
    path = "/v1/session",
    responses(
        (status = 200, description = "Current request identity", body = SessionResponse),
    ),
    security((), ("bearer_auth" = [])),
    tag = "sessions"
)]
pub(crate) async fn session(CallerIdentity(identity): CallerIdentity) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: identity.is_authenticated(),
        subject: identity.subject().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_accepts_aliases() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"identifier":"auth@user.in","secret":"auth_pass"}"#)
                .unwrap();
        assert_eq!(req.email, "auth@user.in");
        assert_eq!(req.password, "auth_pass");

        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"auth@user.in","password":"auth_pass"}"#).unwrap();
        assert_eq!(req.email, "auth@user.in");
    }

    #[test]
    fn login_request_debug_redacts_password() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"auth@user.in","password":"auth_pass"}"#).unwrap();
        let debug = format!("{req:?}");
        assert!(debug.contains("auth@user.in"));
        assert!(!debug.contains("auth_pass"));
    }

    #[test]
    fn session_response_serializes_null_subject() {
        let json = serde_json::to_value(SessionResponse {
            authenticated: false,
            subject: None,
        })
        .unwrap();
        assert_eq!(json["authenticated"], false);
        assert!(json["subject"].is_null());
    }
}
