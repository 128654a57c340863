//! Handler for gift card category listing.

use axum::{Json, extract::State};

use crate::domain::entities::GiftCardCategory;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all gift card categories.
///
/// # Endpoint
///
/// `GET /api/gift-card-categories`
pub async fn category_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GiftCardCategory>>, AppError> {
    let categories = state
        .storage
        .get_all_gift_card_categories()
        .await
        .map_err(AppError::storage("Failed to fetch gift card categories"))?;

    Ok(Json(categories))
}
