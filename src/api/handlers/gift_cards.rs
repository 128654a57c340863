//! Handlers for gift card catalog endpoints.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::extract::parse_id;
use crate::domain::entities::GiftCard;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every gift card.
///
/// # Endpoint
///
/// `GET /api/gift-cards`
pub async fn gift_card_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GiftCard>>, AppError> {
    let cards = state
        .storage
        .get_all_gift_cards()
        .await
        .map_err(AppError::storage("Failed to fetch gift cards"))?;

    Ok(Json(cards))
}

/// Lists gift cards flagged for promotional display.
///
/// # Endpoint
///
/// `GET /api/gift-cards/featured`
pub async fn featured_gift_cards_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GiftCard>>, AppError> {
    let cards = state
        .storage
        .get_featured_gift_cards()
        .await
        .map_err(AppError::storage("Failed to fetch featured gift cards"))?;

    Ok(Json(cards))
}

/// Returns a single gift card.
///
/// # Endpoint
///
/// `GET /api/gift-cards/{id}`
///
/// # Errors
///
/// Returns 400 if `id` is not numeric (checked before touching storage).
/// The whole segment must be an integer: `1abc` is rejected rather than
/// read as `1` the way a lenient prefix parse would.
/// Returns 404 if no gift card has that id.
pub async fn gift_card_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GiftCard>, AppError> {
    let id = parse_id(&id, "Invalid gift card ID")?;

    let card = state
        .storage
        .get_gift_card(id)
        .await
        .map_err(AppError::storage("Failed to fetch gift card"))?
        .ok_or_else(|| AppError::not_found("Gift card not found"))?;

    Ok(Json(card))
}

/// Lists gift cards in one category. An unknown category yields an empty list.
///
/// # Endpoint
///
/// `GET /api/gift-cards/category/{category_id}`
///
/// # Errors
///
/// Returns 400 if `category_id` is not numeric. As with single gift cards,
/// trailing non-digits (`2abc`) are rejected, not truncated.
pub async fn gift_cards_by_category_handler(
    Path(category_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<GiftCard>>, AppError> {
    let category_id = parse_id(&category_id, "Invalid category ID")?;

    let cards = state
        .storage
        .get_gift_cards_by_category_id(category_id)
        .await
        .map_err(AppError::storage("Failed to fetch gift cards by category"))?;

    Ok(Json(cards))
}
