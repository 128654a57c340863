//! FAQ entry entity.

use serde::Serialize;

/// A question/answer pair shown in the FAQ section, ordered by `order` ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct FaqItem {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub order: i32,
}

#[derive(Debug, Clone)]
pub struct NewFaqItem {
    pub question: String,
    pub answer: String,
    pub order: i32,
}

impl NewFaqItem {
    pub(crate) fn into_faq_item(self, id: i32) -> FaqItem {
        FaqItem {
            id,
            question: self.question,
            answer: self.answer,
            order: self.order,
        }
    }
}
