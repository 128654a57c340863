//! Handler for testimonial listing.

use axum::{Json, extract::State};

use crate::domain::entities::Testimonial;
use crate::error::AppError;
use crate::state::AppState;

/// Lists customer testimonials.
///
/// # Endpoint
///
/// `GET /api/testimonials`
pub async fn testimonial_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = state
        .storage
        .get_all_testimonials()
        .await
        .map_err(AppError::storage("Failed to fetch testimonials"))?;

    Ok(Json(testimonials))
}
