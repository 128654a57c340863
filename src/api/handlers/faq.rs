//! Handler for FAQ listing.

use axum::{Json, extract::State};

use crate::domain::entities::FaqItem;
use crate::error::AppError;
use crate::state::AppState;

/// Lists FAQ entries in display order.
///
/// # Endpoint
///
/// `GET /api/faq`
pub async fn faq_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<FaqItem>>, AppError> {
    let items = state
        .storage
        .get_all_faq_items()
        .await
        .map_err(AppError::storage("Failed to fetch FAQ items"))?;

    Ok(Json(items))
}
