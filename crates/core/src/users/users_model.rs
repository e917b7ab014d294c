//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain model representing a registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    /// Argon2 PHC string. Never serialized to API responses; the server
    /// layer maps `User` to a public profile DTO.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a new user. Carries the plaintext password;
/// the service hashes it before it reaches the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Repository-level input: the password has already been hashed.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}
