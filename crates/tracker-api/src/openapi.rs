//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented routes into one OpenAPI document, served
//! at `/openapi.json`. Declares the `bearer_auth` scheme used by
//! authenticated routes.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tracker API",
        version = "0.1.0",
        description = "Stateless bearer-token authentication, registration, and identity lookup.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::sessions::login,
        crate::routes::sessions::session,
        crate::routes::users::register,
        crate::routes::users::current_user,
        crate::routes::users::get_user,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::sessions::LoginRequest,
        crate::routes::sessions::LoginResponse,
        crate::routes::sessions::SessionResponse,
        crate::routes::users::RegisterRequest,
        crate::routes::users::UserResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "sessions", description = "Login and request identity"),
        (name = "users", description = "Registration and identity lookup"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
