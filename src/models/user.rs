//! User record types.

use serde::{Deserialize, Serialize};

/// Longest accepted user name, in bytes.
pub const MAX_NAME_LENGTH: usize = 128;

/// A stored user. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
}

impl NewUser {
    pub fn new(name: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            age,
        }
    }

    /// Returns an error message if the payload is unusable.
    pub fn validate(&self) -> Option<String> {
        validate_fields(&self.name, self.age)
    }

    /// Attaches a store-assigned id.
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
        }
    }
}

/// Checks a user's name and age; returns an error message if invalid.
pub fn validate_fields(name: &str, age: i32) -> Option<String> {
    if let Some(msg) = validate_name(name) {
        return Some(msg);
    }
    if age < 0 {
        return Some("Age cannot be negative".to_string());
    }
    None
}

/// Checks a lookup key; returns an error message if invalid.
///
/// Whitespace-only names are rejected like empty ones.
pub fn validate_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("Name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Some(format!(
            "Name exceeds maximum length of {} bytes",
            MAX_NAME_LENGTH
        ));
    }
    None
}
