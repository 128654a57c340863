//! DTOs for the newsletter subscription endpoint.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::NewNewsletterSubscriber;

/// Request body for `POST /api/newsletter/subscribe`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
}

impl From<SubscribeRequest> for NewNewsletterSubscriber {
    fn from(request: SubscribeRequest) -> Self {
        Self {
            email: request.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_passes() {
        let request = SubscribeRequest {
            email: "fan@example.com".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_invalid_email_fails() {
        let request = SubscribeRequest {
            email: "not-an-email".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
