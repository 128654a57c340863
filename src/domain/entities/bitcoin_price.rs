//! Bitcoin price snapshot entity.

use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A recorded Bitcoin price.
///
/// The most recent snapshot is the one with the highest `id`.
/// `updated_at` is an ISO-8601 timestamp string as supplied by the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BitcoinPriceUpdate {
    pub id: i32,
    pub price: Decimal,
    pub change_percentage: Decimal,
    pub updated_at: String,
}

/// Input data for recording a new price snapshot.
#[derive(Debug, Clone)]
pub struct NewBitcoinPriceUpdate {
    pub price: Decimal,
    pub change_percentage: Decimal,
    pub updated_at: String,
}

impl NewBitcoinPriceUpdate {
    /// Creates a snapshot stamped with the current UTC time
    /// (millisecond precision, `Z` suffix).
    pub fn now(price: Decimal, change_percentage: Decimal) -> Self {
        Self {
            price,
            change_percentage,
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub(crate) fn into_update(self, id: i32) -> BitcoinPriceUpdate {
        BitcoinPriceUpdate {
            id,
            price: self.price,
            change_percentage: self.change_percentage,
            updated_at: self.updated_at,
        }
    }
}
