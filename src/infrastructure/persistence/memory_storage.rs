//! In-process implementation of the storage trait.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI32, Ordering};

use crate::domain::entities::{
    BitcoinPriceUpdate, FaqItem, GiftCard, GiftCardCategory, NewBitcoinPriceUpdate, NewFaqItem,
    NewGiftCard, NewGiftCardCategory, NewNewsletterSubscriber, NewTestimonial, NewUser,
    NewsletterSubscriber, Testimonial, User,
};
use crate::domain::storage::{Storage, StorageError, StorageResult};
use crate::infrastructure::seed;

/// Records of one kind plus the counter that assigns their identities.
#[derive(Debug)]
struct Table<T> {
    rows: DashMap<i32, T>,
    next_id: AtomicI32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    /// Reserves the next identity, builds the record with it and stores it.
    fn insert_with(&self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = build(id);
        self.rows.insert(id, record.clone());
        record
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).map(|r| r.value().clone())
    }

    fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }

    /// Matching records in ascending identity order.
    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut matched: Vec<(i32, T)> = self
            .rows
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        matched.sort_unstable_by_key(|(id, _)| *id);
        matched.into_iter().map(|(_, record)| record).collect()
    }

    fn all(&self) -> Vec<T> {
        self.filter(|_| true)
    }

    fn last(&self) -> Option<T> {
        self.rows
            .iter()
            .max_by_key(|entry| *entry.key())
            .map(|entry| entry.value().clone())
    }
}

/// Process-local store, reset on every restart.
///
/// Each record kind lives in its own [`Table`] backed by a sharded `DashMap`,
/// so concurrent handlers never contend on a single lock. Unique fields
/// (username, category slug, subscriber email) are guarded by a secondary
/// index whose entry API makes the check-and-insert atomic.
#[derive(Debug)]
pub struct MemoryStorage {
    users: Table<User>,
    usernames: DashMap<String, User>,
    categories: Table<GiftCardCategory>,
    category_slugs: DashMap<String, GiftCardCategory>,
    gift_cards: Table<GiftCard>,
    bitcoin_prices: Table<BitcoinPriceUpdate>,
    faq_items: Table<FaqItem>,
    testimonials: Table<Testimonial>,
    subscribers: Table<NewsletterSubscriber>,
    subscriber_emails: DashMap<String, NewsletterSubscriber>,
}

impl MemoryStorage {
    /// Creates a store pre-loaded with the seed fixtures.
    ///
    /// # Errors
    ///
    /// Propagates the first fixture that fails to insert.
    pub async fn seeded() -> StorageResult<Self> {
        let storage = Self::empty();
        seed::seed(&storage).await?;
        Ok(storage)
    }

    /// Creates a store with no records.
    pub fn empty() -> Self {
        Self {
            users: Table::new(),
            usernames: DashMap::new(),
            categories: Table::new(),
            category_slugs: DashMap::new(),
            gift_cards: Table::new(),
            bitcoin_prices: Table::new(),
            faq_items: Table::new(),
            testimonials: Table::new(),
            subscribers: Table::new(),
            subscriber_emails: DashMap::new(),
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        Ok(self.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self.usernames.get(username).map(|u| u.value().clone()))
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(taken) => Err(StorageError::Conflict {
                entity: "user",
                field: "username",
                value: taken.key().clone(),
            }),
            Entry::Vacant(slot) => {
                let created = self.users.insert_with(|id| user.into_user(id));
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }

    async fn get_all_gift_card_categories(&self) -> StorageResult<Vec<GiftCardCategory>> {
        Ok(self.categories.all())
    }

    async fn get_gift_card_category(&self, id: i32) -> StorageResult<Option<GiftCardCategory>> {
        Ok(self.categories.get(id))
    }

    async fn create_gift_card_category(
        &self,
        category: NewGiftCardCategory,
    ) -> StorageResult<GiftCardCategory> {
        match self.category_slugs.entry(category.slug.clone()) {
            Entry::Occupied(taken) => Err(StorageError::Conflict {
                entity: "gift card category",
                field: "slug",
                value: taken.key().clone(),
            }),
            Entry::Vacant(slot) => {
                let created = self
                    .categories
                    .insert_with(|id| category.into_category(id));
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }

    async fn get_all_gift_cards(&self) -> StorageResult<Vec<GiftCard>> {
        Ok(self.gift_cards.all())
    }

    async fn get_gift_card(&self, id: i32) -> StorageResult<Option<GiftCard>> {
        Ok(self.gift_cards.get(id))
    }

    async fn get_gift_cards_by_category_id(
        &self,
        category_id: i32,
    ) -> StorageResult<Vec<GiftCard>> {
        Ok(self.gift_cards.filter(|g| g.category_id == category_id))
    }

    async fn get_featured_gift_cards(&self) -> StorageResult<Vec<GiftCard>> {
        Ok(self.gift_cards.filter(|g| g.featured))
    }

    async fn create_gift_card(&self, gift_card: NewGiftCard) -> StorageResult<GiftCard> {
        if !self.categories.contains(gift_card.category_id) {
            return Err(StorageError::InvalidReference {
                entity: "gift card",
                field: "category",
                id: gift_card.category_id,
            });
        }

        Ok(self
            .gift_cards
            .insert_with(|id| gift_card.into_gift_card(id)))
    }

    async fn get_latest_bitcoin_price_update(&self) -> StorageResult<Option<BitcoinPriceUpdate>> {
        Ok(self.bitcoin_prices.last())
    }

    async fn create_bitcoin_price_update(
        &self,
        update: NewBitcoinPriceUpdate,
    ) -> StorageResult<BitcoinPriceUpdate> {
        Ok(self.bitcoin_prices.insert_with(|id| update.into_update(id)))
    }

    async fn get_all_faq_items(&self) -> StorageResult<Vec<FaqItem>> {
        let mut items = self.faq_items.all();
        // Stable sort keeps identity order among equal `order` values.
        items.sort_by_key(|item| item.order);
        Ok(items)
    }

    async fn get_faq_item(&self, id: i32) -> StorageResult<Option<FaqItem>> {
        Ok(self.faq_items.get(id))
    }

    async fn create_faq_item(&self, faq_item: NewFaqItem) -> StorageResult<FaqItem> {
        Ok(self.faq_items.insert_with(|id| faq_item.into_faq_item(id)))
    }

    async fn get_all_testimonials(&self) -> StorageResult<Vec<Testimonial>> {
        Ok(self.testimonials.all())
    }

    async fn get_testimonial(&self, id: i32) -> StorageResult<Option<Testimonial>> {
        Ok(self.testimonials.get(id))
    }

    async fn create_testimonial(&self, testimonial: NewTestimonial) -> StorageResult<Testimonial> {
        Ok(self
            .testimonials
            .insert_with(|id| testimonial.into_testimonial(id)))
    }

    async fn create_newsletter_subscriber(
        &self,
        subscriber: NewNewsletterSubscriber,
    ) -> StorageResult<NewsletterSubscriber> {
        match self.subscriber_emails.entry(subscriber.email.clone()) {
            Entry::Occupied(existing) => Ok(existing.get().clone()),
            Entry::Vacant(slot) => {
                let created = self
                    .subscribers
                    .insert_with(|id| subscriber.into_subscriber(id));
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }

    async fn get_newsletter_subscriber_by_email(
        &self,
        email: &str,
    ) -> StorageResult<Option<NewsletterSubscriber>> {
        Ok(self.subscriber_emails.get(email).map(|s| s.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn price(value: i64) -> NewBitcoinPriceUpdate {
        NewBitcoinPriceUpdate {
            price: Decimal::from(value),
            change_percentage: Decimal::ZERO,
            updated_at: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn faq(order: i32) -> NewFaqItem {
        NewFaqItem {
            question: format!("Question {order}"),
            answer: "Answer".to_string(),
            order,
        }
    }

    #[tokio::test]
    async fn test_seeded_store_holds_every_fixture() {
        let storage = MemoryStorage::seeded().await.unwrap();

        let categories = storage.get_all_gift_card_categories().await.unwrap();
        assert_eq!(categories.len(), seed::categories().len());
        assert_eq!(
            storage.get_all_gift_cards().await.unwrap().len(),
            seed::gift_cards(&categories).len()
        );
        assert_eq!(
            storage.get_all_faq_items().await.unwrap().len(),
            seed::faq_items().len()
        );
        assert_eq!(
            storage.get_all_testimonials().await.unwrap().len(),
            seed::testimonials().len()
        );
        assert_eq!(
            storage
                .get_latest_bitcoin_price_update()
                .await
                .unwrap()
                .map(|p| p.price),
            Some(seed::bitcoin_price().price)
        );
    }

    #[tokio::test]
    async fn test_seeded_identities_are_deterministic() {
        let storage = MemoryStorage::seeded().await.unwrap();

        let categories = storage.get_all_gift_card_categories().await.unwrap();
        let ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(categories[1].slug, "shopping");

        let cards = storage.get_all_gift_cards().await.unwrap();
        let ids: Vec<i32> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(storage.get_all_faq_items().await.unwrap().len(), 4);
        assert_eq!(storage.get_all_testimonials().await.unwrap().len(), 3);
        assert!(
            storage
                .get_latest_bitcoin_price_update()
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_identities_strictly_increase() {
        let storage = MemoryStorage::seeded().await.unwrap();

        let first = storage
            .create_gift_card_category(NewGiftCardCategory::new("Toys", "toys"))
            .await
            .unwrap();
        let second = storage
            .create_gift_card_category(NewGiftCardCategory::new("Travel", "travel"))
            .await
            .unwrap();

        assert_eq!(first.id, 6);
        assert_eq!(second.id, 7);
    }

    #[tokio::test]
    async fn test_category_round_trip() {
        let storage = MemoryStorage::seeded().await.unwrap();

        let created = storage
            .create_gift_card_category(NewGiftCardCategory::new("Toys", "toys"))
            .await
            .unwrap();

        let all = storage.get_all_gift_card_categories().await.unwrap();
        assert!(
            all.iter()
                .any(|c| c.id == created.id && c.name == "Toys" && c.slug == "toys")
        );
        assert_eq!(
            storage.get_gift_card_category(created.id).await.unwrap(),
            Some(created)
        );
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let storage = MemoryStorage::seeded().await.unwrap();

        let result = storage
            .create_gift_card_category(NewGiftCardCategory::new("More Shopping", "shopping"))
            .await;

        assert!(matches!(
            result,
            Err(StorageError::Conflict { field: "slug", .. })
        ));
        assert_eq!(storage.get_all_gift_card_categories().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_featured_is_subset_of_all() {
        let storage = MemoryStorage::seeded().await.unwrap();
        storage
            .create_gift_card(NewGiftCard {
                name: "Plain Card".to_string(),
                description: "Not promoted".to_string(),
                image_url: "https://example.com/plain.jpg".to_string(),
                category_id: 1,
                min_amount: Decimal::from(5),
                max_amount: Decimal::from(50),
                featured: false,
            })
            .await
            .unwrap();

        let all = storage.get_all_gift_cards().await.unwrap();
        let featured = storage.get_featured_gift_cards().await.unwrap();

        let expected: Vec<GiftCard> = all.into_iter().filter(|g| g.featured).collect();
        assert_eq!(featured, expected);
        assert_eq!(featured.len(), 4);
    }

    #[tokio::test]
    async fn test_gift_cards_by_category() {
        let storage = MemoryStorage::seeded().await.unwrap();

        let gaming = storage.get_gift_cards_by_category_id(5).await.unwrap();
        assert_eq!(gaming.len(), 1);
        assert_eq!(gaming[0].name, "Steam Gift Card");

        assert!(
            storage
                .get_gift_cards_by_category_id(1)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_gift_card_with_unknown_category_rejected() {
        let storage = MemoryStorage::empty();

        let result = storage
            .create_gift_card(NewGiftCard {
                name: "Orphan".to_string(),
                description: "No category".to_string(),
                image_url: "https://example.com/orphan.jpg".to_string(),
                category_id: 42,
                min_amount: Decimal::from(1),
                max_amount: Decimal::from(2),
                featured: false,
            })
            .await;

        assert!(matches!(
            result,
            Err(StorageError::InvalidReference { id: 42, .. })
        ));
        assert!(storage.get_all_gift_cards().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_gift_card_is_none() {
        let storage = MemoryStorage::seeded().await.unwrap();
        assert!(storage.get_gift_card(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_bitcoin_price() {
        let storage = MemoryStorage::empty();
        assert!(
            storage
                .get_latest_bitcoin_price_update()
                .await
                .unwrap()
                .is_none()
        );

        storage.create_bitcoin_price_update(price(100)).await.unwrap();
        let second = storage.create_bitcoin_price_update(price(200)).await.unwrap();

        let latest = storage.get_latest_bitcoin_price_update().await.unwrap();
        assert_eq!(latest, Some(second));
    }

    #[tokio::test]
    async fn test_faq_sorted_by_order_regardless_of_insertion() {
        let storage = MemoryStorage::empty();
        for order in [3, 1, 2, 1] {
            storage.create_faq_item(faq(order)).await.unwrap();
        }

        let items = storage.get_all_faq_items().await.unwrap();
        let orders: Vec<i32> = items.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![1, 1, 2, 3]);
        // Equal orders keep insertion (identity) order.
        assert!(items[0].id < items[1].id);

        assert_eq!(storage.get_faq_item(1).await.unwrap().unwrap().order, 3);
    }

    #[tokio::test]
    async fn test_testimonial_lookup() {
        let storage = MemoryStorage::seeded().await.unwrap();

        let first = storage.get_testimonial(1).await.unwrap().unwrap();
        assert_eq!(first.initials, "JD");
        assert!(storage.get_testimonial(4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_subscribe_is_idempotent_by_email() {
        let storage = MemoryStorage::empty();

        let first = storage
            .create_newsletter_subscriber(NewNewsletterSubscriber {
                email: "fan@example.com".to_string(),
            })
            .await
            .unwrap();
        let second = storage
            .create_newsletter_subscriber(NewNewsletterSubscriber {
                email: "fan@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(storage.subscribers.all().len(), 1);
        assert_eq!(
            storage
                .get_newsletter_subscriber_by_email("fan@example.com")
                .await
                .unwrap(),
            Some(first)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_subscribes_create_one_record() {
        let storage = Arc::new(MemoryStorage::empty());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    storage
                        .create_newsletter_subscriber(NewNewsletterSubscriber {
                            email: "race@example.com".to_string(),
                        })
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }

        assert!(ids.iter().all(|id| *id == ids[0]));
        assert_eq!(storage.subscribers.all().len(), 1);
    }

    #[tokio::test]
    async fn test_users_unique_by_username() {
        let storage = MemoryStorage::empty();

        let alice = storage
            .create_user(NewUser {
                username: "alice".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        let duplicate = storage
            .create_user(NewUser {
                username: "alice".to_string(),
                password: "other".to_string(),
            })
            .await;

        assert!(matches!(
            duplicate,
            Err(StorageError::Conflict { field: "username", .. })
        ));
        assert_eq!(storage.get_user(alice.id).await.unwrap(), Some(alice.clone()));
        assert_eq!(
            storage.get_user_by_username("alice").await.unwrap(),
            Some(alice)
        );
        assert!(storage.get_user_by_username("bob").await.unwrap().is_none());
    }
}
