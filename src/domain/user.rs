//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A row of the `users` table, serialized as-is to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Row identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// Email address (unique)
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Data needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
