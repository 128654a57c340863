//! Gift card catalog entities: categories and the cards filed under them.

use rust_decimal::Decimal;
use serde::Serialize;

/// A catalog category such as "Shopping" or "Gaming".
///
/// `slug` is unique and used by the storefront for filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct GiftCardCategory {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Input data for creating a new category.
#[derive(Debug, Clone)]
pub struct NewGiftCardCategory {
    pub name: String,
    pub slug: String,
}

impl NewGiftCardCategory {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }

    pub(crate) fn into_category(self, id: i32) -> GiftCardCategory {
        GiftCardCategory {
            id,
            name: self.name,
            slug: self.slug,
        }
    }
}

/// A purchasable gift card.
///
/// Amounts are exact decimals and serialize as JSON strings (`"25"`, `"500"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GiftCard {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category_id: i32,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub featured: bool,
}

/// Input data for creating a new gift card.
///
/// `category_id` must name an existing [`GiftCardCategory`].
#[derive(Debug, Clone)]
pub struct NewGiftCard {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub category_id: i32,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    pub featured: bool,
}

impl NewGiftCard {
    pub(crate) fn into_gift_card(self, id: i32) -> GiftCard {
        GiftCard {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            category_id: self.category_id,
            min_amount: self.min_amount,
            max_amount: self.max_amount,
            featured: self.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_gift_card_serializes_camel_case_with_string_amounts() {
        let card = NewGiftCard {
            name: "Amazon Gift Card".to_string(),
            description: "Shop anything".to_string(),
            image_url: "https://example.com/amazon.jpg".to_string(),
            category_id: 2,
            min_amount: Decimal::from_str("25").unwrap(),
            max_amount: Decimal::from_str("500.00").unwrap(),
            featured: true,
        }
        .into_gift_card(1);

        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["imageUrl"], "https://example.com/amazon.jpg");
        assert_eq!(json["categoryId"], 2);
        assert_eq!(json["minAmount"], "25");
        assert_eq!(json["maxAmount"], "500.00");
        assert_eq!(json["featured"], true);
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_new_category() {
        let category = NewGiftCardCategory::new("Toys", "toys").into_category(6);

        assert_eq!(category.id, 6);
        assert_eq!(category.name, "Toys");
        assert_eq!(category.slug, "toys");
    }
}
