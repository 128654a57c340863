//! PostgreSQL implementation of the storage trait.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    BitcoinPriceUpdate, FaqItem, GiftCard, GiftCardCategory, NewBitcoinPriceUpdate, NewFaqItem,
    NewGiftCard, NewGiftCardCategory, NewNewsletterSubscriber, NewTestimonial, NewUser,
    NewsletterSubscriber, Testimonial, User,
};
use crate::domain::storage::{Storage, StorageError, StorageResult};
use crate::infrastructure::seed;

/// PostgreSQL-backed storage.
///
/// Every operation is a single-table `SELECT` or `INSERT ... RETURNING`.
/// Uniqueness and the gift card → category foreign key are enforced by the
/// schema; violations are translated into [`StorageError`] variants.
pub struct PgStorage {
    pool: Arc<PgPool>,
}

impl PgStorage {
    /// Creates a new storage with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Inserts the seed fixtures unless the catalog already has a category.
    ///
    /// Returns `true` when seeding ran.
    ///
    /// # Errors
    ///
    /// Propagates any storage failure raised while checking or inserting.
    pub async fn seed_if_empty(&self) -> StorageResult<bool> {
        let existing: Option<i32> = sqlx::query_scalar("SELECT id FROM gift_card_categories LIMIT 1")
            .fetch_optional(self.pool.as_ref())
            .await?;

        if existing.is_some() {
            tracing::debug!("Catalog already populated, skipping seed");
            return Ok(false);
        }

        seed::seed(self).await?;
        Ok(true)
    }
}

/// Maps a unique violation onto [`StorageError::Conflict`].
fn unique_violation(
    e: sqlx::Error,
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> StorageError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => StorageError::Conflict {
            entity,
            field,
            value: value.to_string(),
        },
        _ => StorageError::Database(e),
    }
}

#[async_trait]
impl Storage for PgStorage {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, username, password FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| unique_violation(e, "user", "username", &user.username))
    }

    async fn get_all_gift_card_categories(&self) -> StorageResult<Vec<GiftCardCategory>> {
        let categories = sqlx::query_as::<_, GiftCardCategory>(
            "SELECT id, name, slug FROM gift_card_categories ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(categories)
    }

    async fn get_gift_card_category(&self, id: i32) -> StorageResult<Option<GiftCardCategory>> {
        let category = sqlx::query_as::<_, GiftCardCategory>(
            "SELECT id, name, slug FROM gift_card_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(category)
    }

    async fn create_gift_card_category(
        &self,
        category: NewGiftCardCategory,
    ) -> StorageResult<GiftCardCategory> {
        sqlx::query_as::<_, GiftCardCategory>(
            r#"
            INSERT INTO gift_card_categories (name, slug)
            VALUES ($1, $2)
            RETURNING id, name, slug
            "#,
        )
        .bind(&category.name)
        .bind(&category.slug)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| unique_violation(e, "gift card category", "slug", &category.slug))
    }

    async fn get_all_gift_cards(&self) -> StorageResult<Vec<GiftCard>> {
        let cards = sqlx::query_as::<_, GiftCard>(
            r#"
            SELECT id, name, description, image_url, category_id, min_amount, max_amount, featured
            FROM gift_cards
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    async fn get_gift_card(&self, id: i32) -> StorageResult<Option<GiftCard>> {
        let card = sqlx::query_as::<_, GiftCard>(
            r#"
            SELECT id, name, description, image_url, category_id, min_amount, max_amount, featured
            FROM gift_cards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(card)
    }

    async fn get_gift_cards_by_category_id(
        &self,
        category_id: i32,
    ) -> StorageResult<Vec<GiftCard>> {
        let cards = sqlx::query_as::<_, GiftCard>(
            r#"
            SELECT id, name, description, image_url, category_id, min_amount, max_amount, featured
            FROM gift_cards
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    async fn get_featured_gift_cards(&self) -> StorageResult<Vec<GiftCard>> {
        let cards = sqlx::query_as::<_, GiftCard>(
            r#"
            SELECT id, name, description, image_url, category_id, min_amount, max_amount, featured
            FROM gift_cards
            WHERE featured = TRUE
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(cards)
    }

    async fn create_gift_card(&self, gift_card: NewGiftCard) -> StorageResult<GiftCard> {
        sqlx::query_as::<_, GiftCard>(
            r#"
            INSERT INTO gift_cards
                (name, description, image_url, category_id, min_amount, max_amount, featured)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, image_url, category_id, min_amount, max_amount, featured
            "#,
        )
        .bind(&gift_card.name)
        .bind(&gift_card.description)
        .bind(&gift_card.image_url)
        .bind(gift_card.category_id)
        .bind(gift_card.min_amount)
        .bind(gift_card.max_amount)
        .bind(gift_card.featured)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => StorageError::InvalidReference {
                entity: "gift card",
                field: "category",
                id: gift_card.category_id,
            },
            _ => StorageError::Database(e),
        })
    }

    async fn get_latest_bitcoin_price_update(&self) -> StorageResult<Option<BitcoinPriceUpdate>> {
        let update = sqlx::query_as::<_, BitcoinPriceUpdate>(
            r#"
            SELECT id, price, change_percentage, updated_at
            FROM bitcoin_price_updates
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(update)
    }

    async fn create_bitcoin_price_update(
        &self,
        update: NewBitcoinPriceUpdate,
    ) -> StorageResult<BitcoinPriceUpdate> {
        let created = sqlx::query_as::<_, BitcoinPriceUpdate>(
            r#"
            INSERT INTO bitcoin_price_updates (price, change_percentage, updated_at)
            VALUES ($1, $2, $3)
            RETURNING id, price, change_percentage, updated_at
            "#,
        )
        .bind(update.price)
        .bind(update.change_percentage)
        .bind(&update.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(created)
    }

    async fn get_all_faq_items(&self) -> StorageResult<Vec<FaqItem>> {
        let items = sqlx::query_as::<_, FaqItem>(
            r#"SELECT id, question, answer, "order" FROM faq_items ORDER BY "order", id"#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(items)
    }

    async fn get_faq_item(&self, id: i32) -> StorageResult<Option<FaqItem>> {
        let item = sqlx::query_as::<_, FaqItem>(
            r#"SELECT id, question, answer, "order" FROM faq_items WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(item)
    }

    async fn create_faq_item(&self, faq_item: NewFaqItem) -> StorageResult<FaqItem> {
        let created = sqlx::query_as::<_, FaqItem>(
            r#"
            INSERT INTO faq_items (question, answer, "order")
            VALUES ($1, $2, $3)
            RETURNING id, question, answer, "order"
            "#,
        )
        .bind(&faq_item.question)
        .bind(&faq_item.answer)
        .bind(faq_item.order)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(created)
    }

    async fn get_all_testimonials(&self) -> StorageResult<Vec<Testimonial>> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            "SELECT id, name, role, content, rating, initials FROM testimonials ORDER BY id",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(testimonials)
    }

    async fn get_testimonial(&self, id: i32) -> StorageResult<Option<Testimonial>> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            "SELECT id, name, role, content, rating, initials FROM testimonials WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(testimonial)
    }

    async fn create_testimonial(&self, testimonial: NewTestimonial) -> StorageResult<Testimonial> {
        let created = sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (name, role, content, rating, initials)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, role, content, rating, initials
            "#,
        )
        .bind(&testimonial.name)
        .bind(&testimonial.role)
        .bind(&testimonial.content)
        .bind(testimonial.rating)
        .bind(&testimonial.initials)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(created)
    }

    async fn create_newsletter_subscriber(
        &self,
        subscriber: NewNewsletterSubscriber,
    ) -> StorageResult<NewsletterSubscriber> {
        if let Some(existing) = self
            .get_newsletter_subscriber_by_email(&subscriber.email)
            .await?
        {
            return Ok(existing);
        }

        // A concurrent subscribe may win between the lookup and the insert;
        // the insert then yields no row and the winner's record is returned.
        let inserted = sqlx::query_as::<_, NewsletterSubscriber>(
            r#"
            INSERT INTO newsletter_subscribers (email)
            VALUES ($1)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email
            "#,
        )
        .bind(&subscriber.email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match inserted {
            Some(created) => Ok(created),
            None => {
                let existing = sqlx::query_as::<_, NewsletterSubscriber>(
                    "SELECT id, email FROM newsletter_subscribers WHERE email = $1",
                )
                .bind(&subscriber.email)
                .fetch_one(self.pool.as_ref())
                .await?;

                Ok(existing)
            }
        }
    }

    async fn get_newsletter_subscriber_by_email(
        &self,
        email: &str,
    ) -> StorageResult<Option<NewsletterSubscriber>> {
        let subscriber = sqlx::query_as::<_, NewsletterSubscriber>(
            "SELECT id, email FROM newsletter_subscribers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(subscriber)
    }
}
