//! # Request Body Extraction
//!
//! JSON bodies arrive through [`extract_json`] (parse only) or the
//! [`ValidJson`] extractor (parse, then run the DTO's [`Validate`] rules).
//! Parse failures become 400 `BAD_REQUEST`; rule failures are
//! [`ValidationError`]s and become 422 `VALIDATION_ERROR` through
//! `From<ValidationError> for AppError`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use tracker_core::ValidationError;

use crate::error::AppError;

/// Domain rules a request DTO must satisfy beyond its JSON shape.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Unwrap a JSON body, turning a rejection into [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match result {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(status = %rejection.status(), "rejected request body");
            Err(AppError::BadRequest(rejection.body_text()))
        }
    }
}

/// [`extract_json`] followed by the body's [`Validate`] rules.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate()?;
    Ok(value)
}

/// A JSON body that has passed its [`Validate`] rules.
///
/// Must be the last extractor of a handler, like `Json`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        extract_validated_json(Json::<T>::from_request(req, state).await).map(Self)
    }
}
