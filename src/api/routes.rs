//! API route configuration.
//!
//! All API endpoints are public and unauthenticated.

use crate::api::handlers::{
    bitcoin_price_handler, category_list_handler, faq_list_handler, featured_gift_cards_handler,
    gift_card_handler, gift_card_list_handler, gift_cards_by_category_handler, subscribe_handler,
    testimonial_list_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Storefront API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET  /gift-card-categories`                - List categories
/// - `GET  /gift-cards`                          - List gift cards
/// - `GET  /gift-cards/featured`                 - List featured gift cards
/// - `GET  /gift-cards/{id}`                     - Single gift card
/// - `GET  /gift-cards/category/{category_id}`   - Gift cards in a category
/// - `GET  /bitcoin/price`                       - Latest Bitcoin price
/// - `GET  /faq`                                 - FAQ entries in display order
/// - `GET  /testimonials`                        - Customer testimonials
/// - `POST /newsletter/subscribe`                - Subscribe an email address
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gift-card-categories", get(category_list_handler))
        .route("/gift-cards", get(gift_card_list_handler))
        .route("/gift-cards/featured", get(featured_gift_cards_handler))
        .route("/gift-cards/{id}", get(gift_card_handler))
        .route(
            "/gift-cards/category/{category_id}",
            get(gift_cards_by_category_handler),
        )
        .route("/bitcoin/price", get(bitcoin_price_handler))
        .route("/faq", get(faq_list_handler))
        .route("/testimonials", get(testimonial_list_handler))
        .route("/newsletter/subscribe", post(subscribe_handler))
}
