use crate::errors::Result;
use crate::users::users_model::{NewUser, NewUserRecord, User};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;
    fn get_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert(&self, record: NewUserRecord) -> Result<User>;
}

/// Trait for password hashing, implemented by the server layer (argon2).
/// Kept behind a trait so core tests can use a trivial fake.
pub trait PasswordHasherTrait: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn get_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Returns `Ok(None)` on unknown email or wrong password; callers decide
    /// how to surface that (the HTTP layer maps it to 401).
    fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<User>>;
}
