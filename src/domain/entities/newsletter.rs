//! Newsletter subscriber entity.

use serde::Serialize;

/// An email address subscribed to the newsletter. `email` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct NewsletterSubscriber {
    pub id: i32,
    pub email: String,
}

/// Input data for subscribing an email address.
///
/// Subscribing an address that is already present returns the existing
/// record instead of creating a duplicate.
#[derive(Debug, Clone)]
pub struct NewNewsletterSubscriber {
    pub email: String,
}

impl NewNewsletterSubscriber {
    pub(crate) fn into_subscriber(self, id: i32) -> NewsletterSubscriber {
        NewsletterSubscriber {
            id,
            email: self.email,
        }
    }
}
