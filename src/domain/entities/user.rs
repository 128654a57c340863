//! User account entity.

use serde::Serialize;

/// A registered user.
///
/// `username` is unique across all users. The password is stored as given and
/// never serialized into API responses.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub(crate) fn into_user(self, id: i32) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
        }
    }
}
