//! HTTP request handlers for API endpoints.
//!
//! Each handler maps one route onto one storage call. Storage failures become
//! a generic 500 with a route-specific message.

pub mod bitcoin;
pub mod categories;
pub mod faq;
pub mod gift_cards;
pub mod health;
pub mod newsletter;
pub mod testimonials;

pub use bitcoin::bitcoin_price_handler;
pub use categories::category_list_handler;
pub use faq::faq_list_handler;
pub use gift_cards::{
    featured_gift_cards_handler, gift_card_handler, gift_card_list_handler,
    gift_cards_by_category_handler,
};
pub use health::health_handler;
pub use newsletter::subscribe_handler;
pub use testimonials::testimonial_list_handler;
