//! User domain types.

use std::fmt;

use chrono::{DateTime, Utc};

use royal_bike_core::{Email, UserId};

/// A registered shop customer.
///
/// Created on registration and never mutated afterwards. `Debug` is
/// implemented manually so the password hash never ends up in logs.
#[derive(Clone)]
pub struct User {
    /// Store-assigned id.
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Login key, normalized.
    pub email: Email,
    /// Argon2 PHC string. Never the plaintext password.
    pub password_hash: String,
    pub phone: String,
    pub age: u8,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("phone", &self.phone)
            .field("age", &self.age)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A user that has not been persisted yet.
#[derive(Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password_hash: String,
    pub phone: String,
    pub age: u8,
}

/// Fields of a [`User`] that can be looked up directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Email,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password_hash() {
        let user = User {
            id: UserId::generate(),
            first_name: "Ann".to_string(),
            last_name: "Rider".to_string(),
            email: Email::parse("ann@example.com").unwrap(),
            password_hash: "$argon2id$v=19$secret-hash".to_string(),
            phone: "555-0100".to_string(),
            age: 31,
            created_at: Utc::now(),
        };

        let debug_output = format!("{user:?}");
        assert!(debug_output.contains("Ann"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("secret-hash"));
    }
}
