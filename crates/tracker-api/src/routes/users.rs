//! # User Routes
//!
//! Registration is open. Both lookups require an authenticated caller, so
//! an anonymous client cannot probe which emails are registered.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracker_auth::password::check_policy;
use tracker_auth::Identity;
use tracker_core::{CredentialRecord, Email, ValidationError};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::auth::Authenticated;
use crate::error::AppError;
use crate::extractors::{Validate, ValidJson};
use crate::state::AppState;

/// New account. The password is wiped from memory on drop.
#[derive(Deserialize, ToSchema, Zeroize, ZeroizeOnDrop)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        Email::new(self.email.as_str())?;
        check_policy(&self.password)?;
        if self.display_name.trim().is_empty() {
            return Err(ValidationError::InvalidDisplayName(
                "display name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Public view of a registered user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: *identity.id.as_uuid(),
            email: identity.email.into_inner(),
            display_name: identity.display_name,
            created_at: identity.created_at,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/users", post(register))
        .route("/v1/users/me", get(current_user))
        .route("/v1/users/:email", get(get_user))
}

/// POST /v1/users — Register a new account.
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 409, description = "Email already registered", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "users"
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let email = Email::new(&req.email)?;

    if state.resolver.is_registered(&email).await? {
        return Err(AppError::Conflict(format!("{email} is already registered")));
    }

    let digest = Arc::clone(&state.passwords)
        .hash_blocking(Zeroizing::new(req.password.clone()))
        .await?;
    let record = CredentialRecord::new(email, digest, req.display_name.as_str())?;
    let saved = state.store.save(record).await?;

    tracing::info!(user = %saved.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from(Identity::from(saved))),
    ))
}

/// GET /v1/users/me — The authenticated caller's own record.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    responses(
        (status = 200, description = "Caller's identity", body = UserResponse),
        (status = 401, description = "No valid bearer token", body = crate::error::ErrorBody),
        (status = 404, description = "Token subject no longer exists", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub(crate) async fn current_user(
    State(state): State<AppState>,
    Authenticated(subject): Authenticated,
) -> Result<Json<UserResponse>, AppError> {
    let identity = state.resolver.resolve(&subject).await?;
    Ok(Json(identity.into()))
}

/// GET /v1/users/{email} — Look up a registered user. Authenticated callers only.
#[utoipa::path(
    get,
    path = "/v1/users/{email}",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "No valid bearer token", body = crate::error::ErrorBody),
        (status = 404, description = "Not found", body = crate::error::ErrorBody),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    Authenticated(caller): Authenticated,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    tracing::debug!(caller = %caller, "identity lookup");
    let identity = state.resolver.resolve(&email).await?;
    Ok(Json(identity.into()))
}
