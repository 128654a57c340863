//! Seed fixtures that make a fresh storefront non-empty.
//!
//! Both backends insert the same records in the same declared order:
//! categories, gift cards, one Bitcoin price, FAQ entries, testimonials.
//! On an empty store this yields category ids 1–5 and gift card ids 1–4.

use rust_decimal::Decimal;

use crate::domain::entities::{
    GiftCardCategory, NewBitcoinPriceUpdate, NewFaqItem, NewGiftCard, NewGiftCardCategory,
    NewTestimonial,
};
use crate::domain::storage::{Storage, StorageResult};

const CATEGORIES: [(&str, &str); 5] = [
    ("All Categories", "all"),
    ("Shopping", "shopping"),
    ("Entertainment", "entertainment"),
    ("Dining", "dining"),
    ("Gaming", "gaming"),
];

/// (category slug, name, description, image url, min amount, max amount)
const GIFT_CARDS: [(&str, &str, &str, &str, i64, i64); 4] = [
    (
        "shopping",
        "Amazon Gift Card",
        "Use Amazon Gift Cards to purchase millions of items across Amazon.",
        "https://images.unsplash.com/photo-1607083206968-13611e3d76db?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        25,
        500,
    ),
    (
        "entertainment",
        "Netflix Gift Card",
        "Give the gift of entertainment with Netflix Gift Cards.",
        "https://images.unsplash.com/photo-1522869635100-9f4c5e86aa37?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        25,
        100,
    ),
    (
        "dining",
        "Starbucks Gift Card",
        "Perfect for coffee lovers and casual meetups.",
        "https://images.unsplash.com/photo-1453614512568-c4024d13c247?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        10,
        100,
    ),
    (
        "gaming",
        "Steam Gift Card",
        "Access to thousands of games on the Steam platform.",
        "https://images.unsplash.com/photo-1511512578047-dfb367046420?ixlib=rb-4.0.3&auto=format&fit=crop&w=500&h=300",
        20,
        100,
    ),
];

const FAQ_ITEMS: [(&str, &str); 4] = [
    (
        "How quickly will I receive my gift card?",
        "Most gift cards are delivered instantly to your email after purchase. In rare cases, it might take up to 24 hours. You can always check the status of your order in your account or contact our support via WhatsApp.",
    ),
    (
        "Is it safe to buy Bitcoin through your platform?",
        "Yes, we implement industry-standard security measures to protect all transactions. We use secure payment processors and follow strict verification procedures to ensure the safety of your purchases.",
    ),
    (
        "What payment methods do you accept?",
        "We accept various payment methods including credit/debit cards, bank transfers, and selected cryptocurrencies. The available payment options will be displayed during the checkout process.",
    ),
    (
        "How can I contact your customer support?",
        "Our dedicated support team is available 24/7 via WhatsApp. You can also email us at support@giftbit.com or use the contact form on our website. We typically respond within minutes on WhatsApp.",
    ),
];

/// (name, role, content, rating, initials)
const TESTIMONIALS: [(&str, &str, &str, i32, &str); 3] = [
    (
        "John Doe",
        "Bitcoin Customer",
        "The easiest way to buy Bitcoin I've ever found. The WhatsApp support answered all my questions instantly. Highly recommended!",
        5,
        "JD",
    ),
    (
        "Jane Smith",
        "Gift Card Customer",
        "I needed a last-minute gift card for my nephew's birthday and GiftBit delivered it instantly. The process was smooth and hassle-free.",
        5,
        "JS",
    ),
    (
        "Robert Johnson",
        "New Crypto Investor",
        "As a first-time Bitcoin buyer, I was nervous. The team at GiftBit guided me through every step. Their customer service is unmatched!",
        4,
        "RJ",
    ),
];

pub fn categories() -> Vec<NewGiftCardCategory> {
    CATEGORIES
        .iter()
        .map(|(name, slug)| NewGiftCardCategory::new(*name, *slug))
        .collect()
}

/// Gift card fixtures bound to the identities of already-created categories.
///
/// Cards whose category slug is not among `categories` are skipped.
pub fn gift_cards(categories: &[GiftCardCategory]) -> Vec<NewGiftCard> {
    GIFT_CARDS
        .iter()
        .filter_map(|(slug, name, description, image_url, min, max)| {
            let category = categories.iter().find(|c| c.slug == *slug)?;
            Some(NewGiftCard {
                name: name.to_string(),
                description: description.to_string(),
                image_url: image_url.to_string(),
                category_id: category.id,
                min_amount: Decimal::from(*min),
                max_amount: Decimal::from(*max),
                featured: true,
            })
        })
        .collect()
}

/// The initial price point: 45678.90, up 2.34%, stamped now.
pub fn bitcoin_price() -> NewBitcoinPriceUpdate {
    NewBitcoinPriceUpdate::now(Decimal::new(4_567_890, 2), Decimal::new(234, 2))
}

pub fn faq_items() -> Vec<NewFaqItem> {
    FAQ_ITEMS
        .iter()
        .zip(1..)
        .map(|((question, answer), order)| NewFaqItem {
            question: question.to_string(),
            answer: answer.to_string(),
            order,
        })
        .collect()
}

pub fn testimonials() -> Vec<NewTestimonial> {
    TESTIMONIALS
        .iter()
        .map(|(name, role, content, rating, initials)| NewTestimonial {
            name: name.to_string(),
            role: role.to_string(),
            content: content.to_string(),
            rating: *rating,
            initials: initials.to_string(),
        })
        .collect()
}

/// Inserts every fixture through the storage interface, in declared order.
///
/// Does not check for existing rows; callers decide whether seeding is needed.
///
/// # Errors
///
/// Propagates the first storage failure.
pub async fn seed(storage: &dyn Storage) -> StorageResult<()> {
    let mut created = Vec::with_capacity(CATEGORIES.len());
    for category in categories() {
        created.push(storage.create_gift_card_category(category).await?);
    }

    for gift_card in gift_cards(&created) {
        storage.create_gift_card(gift_card).await?;
    }

    storage.create_bitcoin_price_update(bitcoin_price()).await?;

    for faq_item in faq_items() {
        storage.create_faq_item(faq_item).await?;
    }

    for testimonial in testimonials() {
        storage.create_testimonial(testimonial).await?;
    }

    tracing::info!(backend = storage.backend_name(), "Seed data inserted");

    Ok(())
}
