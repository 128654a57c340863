//! Handler for newsletter subscription.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::newsletter::SubscribeRequest;
use crate::api::extract::ValidatedJson;
use crate::domain::entities::NewsletterSubscriber;
use crate::error::AppError;
use crate::state::AppState;

/// Subscribes an email address to the newsletter.
///
/// # Endpoint
///
/// `POST /api/newsletter/subscribe`
///
/// # Request Body
///
/// ```json
/// { "email": "fan@example.com" }
/// ```
///
/// Subscribing an address twice returns the original record.
///
/// # Errors
///
/// Returns 400 if the body is malformed or the email is invalid.
pub async fn subscribe_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SubscribeRequest>,
) -> Result<(StatusCode, Json<NewsletterSubscriber>), AppError> {
    let subscriber = state
        .storage
        .create_newsletter_subscriber(payload.into())
        .await
        .map_err(AppError::storage("Failed to subscribe to newsletter"))?;

    tracing::info!(id = subscriber.id, "Newsletter subscription recorded");

    Ok((StatusCode::CREATED, Json(subscriber)))
}
