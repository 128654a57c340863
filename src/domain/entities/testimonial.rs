//! Customer testimonial entity.

use serde::Serialize;

/// A customer quote with a star rating (1 to 5) and display initials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub content: String,
    pub rating: i32,
    pub initials: String,
}

#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub name: String,
    pub role: String,
    pub content: String,
    pub rating: i32,
    pub initials: String,
}

impl NewTestimonial {
    pub(crate) fn into_testimonial(self, id: i32) -> Testimonial {
        Testimonial {
            id,
            name: self.name,
            role: self.role,
            content: self.content,
            rating: self.rating,
            initials: self.initials,
        }
    }
}
