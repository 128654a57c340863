//! Request extractors shared by API handlers.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that is deserialized and then validated.
///
/// Malformed bodies and failed validation rules both reject with
/// `400 Bad Request` and a `Validation error: ...` message, so the storage
/// layer only ever sees well-formed input.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(format!("Validation error: {}", rejection.body_text()))
            })?;

        value.validate()?;

        Ok(Self(value))
    }
}

/// Parses a numeric path segment, rejecting anything else with `message`.
///
/// Surrounding whitespace is ignored; any other non-digit, including a
/// trailing suffix such as `1abc`, is an error.
pub fn parse_id(raw: &str, message: &'static str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::bad_request(message))
}
