//! Core domain entities representing the storefront data model.
//!
//! Entities are plain data structures without business logic. They serialize
//! directly into API responses and map one-to-one onto database rows.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`GiftCardCategory`] / [`GiftCard`] - The gift card catalog
//! - [`BitcoinPriceUpdate`] - A Bitcoin price snapshot
//! - [`FaqItem`] - A FAQ entry
//! - [`Testimonial`] - A customer quote
//! - [`NewsletterSubscriber`] - A newsletter email address
//!
//! # Design Pattern
//!
//! Every entity has a companion `New*` struct carrying all fields except the
//! identity, which is assigned by the storage backend on creation. Records are
//! append-only: nothing is updated or deleted after insertion.

pub mod bitcoin_price;
pub mod faq_item;
pub mod gift_card;
pub mod newsletter;
pub mod testimonial;
pub mod user;

pub use bitcoin_price::{BitcoinPriceUpdate, NewBitcoinPriceUpdate};
pub use faq_item::{FaqItem, NewFaqItem};
pub use gift_card::{GiftCard, GiftCardCategory, NewGiftCard, NewGiftCardCategory};
pub use newsletter::{NewNewsletterSubscriber, NewsletterSubscriber};
pub use testimonial::{NewTestimonial, Testimonial};
pub use user::{NewUser, User};
