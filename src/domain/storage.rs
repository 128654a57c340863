//! Storage trait shared by the in-memory and PostgreSQL backends.
//!
//! The contract is append-only: every record kind supports creation and reads,
//! none supports update or delete. Identities are assigned by the backend,
//! start at 1 and increase strictly per record kind.
//!
//! # Implementations
//!
//! - [`crate::infrastructure::persistence::MemoryStorage`] - process-local, seeded on construction
//! - [`crate::infrastructure::persistence::PgStorage`] - PostgreSQL, seeded when empty
//! - Test mocks available with `cfg(test)`

use async_trait::async_trait;

use crate::domain::entities::{
    BitcoinPriceUpdate, FaqItem, GiftCard, GiftCardCategory, NewBitcoinPriceUpdate, NewFaqItem,
    NewGiftCard, NewGiftCardCategory, NewNewsletterSubscriber, NewTestimonial, NewUser,
    NewsletterSubscriber, Testimonial, User,
};

/// Failure raised by a storage backend.
///
/// A missing record is not a failure; lookups return `Ok(None)` instead.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A unique field (username, category slug) is already taken.
    #[error("{entity} with {field} '{value}' already exists")]
    Conflict {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// A foreign key names a record that does not exist.
    #[error("{entity} references unknown {field} {id}")]
    InvalidReference {
        entity: &'static str,
        field: &'static str,
        id: i32,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Read/write operations over the seven storefront record kinds.
///
/// Listings are returned in ascending identity order unless noted otherwise.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Short backend identifier reported by the health check.
    fn backend_name(&self) -> &'static str;

    // Users
    async fn get_user(&self, id: i32) -> StorageResult<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Conflict`] if the username is taken.
    async fn create_user(&self, user: NewUser) -> StorageResult<User>;

    // Gift card categories
    async fn get_all_gift_card_categories(&self) -> StorageResult<Vec<GiftCardCategory>>;

    async fn get_gift_card_category(&self, id: i32) -> StorageResult<Option<GiftCardCategory>>;

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Conflict`] if the slug is taken.
    async fn create_gift_card_category(
        &self,
        category: NewGiftCardCategory,
    ) -> StorageResult<GiftCardCategory>;

    // Gift cards
    async fn get_all_gift_cards(&self) -> StorageResult<Vec<GiftCard>>;

    async fn get_gift_card(&self, id: i32) -> StorageResult<Option<GiftCard>>;

    async fn get_gift_cards_by_category_id(&self, category_id: i32)
    -> StorageResult<Vec<GiftCard>>;

    /// Returns exactly the gift cards whose `featured` flag is set.
    async fn get_featured_gift_cards(&self) -> StorageResult<Vec<GiftCard>>;

    /// Creates a gift card.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidReference`] if `category_id` names no category.
    async fn create_gift_card(&self, gift_card: NewGiftCard) -> StorageResult<GiftCard>;

    // Bitcoin price updates
    /// Returns the most recently created snapshot, or `None` if there is none yet.
    async fn get_latest_bitcoin_price_update(&self) -> StorageResult<Option<BitcoinPriceUpdate>>;

    async fn create_bitcoin_price_update(
        &self,
        update: NewBitcoinPriceUpdate,
    ) -> StorageResult<BitcoinPriceUpdate>;

    // FAQ items
    /// Returns all entries sorted by `order` ascending, ties broken by identity.
    async fn get_all_faq_items(&self) -> StorageResult<Vec<FaqItem>>;

    async fn get_faq_item(&self, id: i32) -> StorageResult<Option<FaqItem>>;

    async fn create_faq_item(&self, faq_item: NewFaqItem) -> StorageResult<FaqItem>;

    // Testimonials
    async fn get_all_testimonials(&self) -> StorageResult<Vec<Testimonial>>;

    async fn get_testimonial(&self, id: i32) -> StorageResult<Option<Testimonial>>;

    async fn create_testimonial(&self, testimonial: NewTestimonial) -> StorageResult<Testimonial>;

    // Newsletter subscribers
    /// Subscribes an email address.
    ///
    /// Idempotent by email: if the address is already subscribed the existing
    /// record is returned unchanged.
    async fn create_newsletter_subscriber(
        &self,
        subscriber: NewNewsletterSubscriber,
    ) -> StorageResult<NewsletterSubscriber>;

    async fn get_newsletter_subscriber_by_email(
        &self,
        email: &str,
    ) -> StorageResult<Option<NewsletterSubscriber>>;
}
