use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, NewUserRecord, User};
use super::users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use async_trait::async_trait;

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasherTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn PasswordHasherTrait>,
    ) -> Self {
        UserService { repository, hasher }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        let email = new_user.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "'{}' is not a valid email address",
                new_user.email
            ))));
        }
        if new_user.display_name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "displayName".to_string(),
            )));
        }
        if new_user.password.len() < 8 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Password must be at least 8 characters".to_string(),
            )));
        }

        if self.repository.get_by_email(&email)?.is_some() {
            return Err(Error::ConstraintViolation(format!(
                "A user with email '{}' already exists",
                email
            )));
        }

        debug!("Registering user {}", email);
        let password_hash = self.hasher.hash(&new_user.password)?;
        self.repository
            .insert(NewUserRecord {
                email,
                display_name: new_user.display_name.trim().to_string(),
                password_hash,
            })
            .await
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        self.repository.get_by_email(&email.trim().to_lowercase())
    }

    fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        let user = match self.repository.get_by_email(&email.trim().to_lowercase())? {
            Some(user) => user,
            None => return Ok(None),
        };
        if self.hasher.verify(password, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::RwLock;

    struct MockUserRepository {
        users: RwLock<Vec<User>>,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                users: RwLock::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        fn get_by_id(&self, user_id: &str) -> Result<User> {
            self.users
                .read()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned()
                .ok_or_else(|| {
                    crate::errors::DatabaseError::NotFound(user_id.to_string()).into()
                })
        }

        fn get_by_email(&self, email: &str) -> Result<Option<User>> {
            Ok(self
                .users
                .read()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned())
        }

        async fn insert(&self, record: NewUserRecord) -> Result<User> {
            let now = NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            let user = User {
                id: uuid::Uuid::new_v4().to_string(),
                email: record.email,
                display_name: record.display_name,
                password_hash: record.password_hash,
                created_at: now,
                updated_at: now,
            };
            self.users.write().unwrap().push(user.clone());
            Ok(user)
        }
    }

    /// Reversed-string "hash" - enough to test service wiring.
    struct FakeHasher;

    impl PasswordHasherTrait for FakeHasher {
        fn hash(&self, password: &str) -> Result<String> {
            Ok(password.chars().rev().collect())
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool> {
            Ok(password.chars().rev().collect::<String>() == hash)
        }
    }

    fn make_service() -> UserService {
        UserService::new(Arc::new(MockUserRepository::new()), Arc::new(FakeHasher))
    }

    fn valid_input() -> NewUser {
        NewUser {
            email: "Ada@Example.com".to_string(),
            display_name: "Ada".to_string(),
            password: "correct horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_hashes_password() {
        let service = make_service();
        let user = service.register(valid_input()).await.unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_ne!(user.password_hash, "correct horse");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = make_service();
        service.register(valid_input()).await.unwrap();

        let result = service.register(valid_input()).await;
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let service = make_service();
        let result = service
            .register(NewUser {
                password: "short".to_string(),
                ..valid_input()
            })
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let service = make_service();
        service.register(valid_input()).await.unwrap();

        let ok = service
            .verify_credentials("ada@example.com", "correct horse")
            .unwrap();
        assert!(ok.is_some());

        let wrong = service
            .verify_credentials("ada@example.com", "wrong")
            .unwrap();
        assert!(wrong.is_none());

        let unknown = service
            .verify_credentials("nobody@example.com", "correct horse")
            .unwrap();
        assert!(unknown.is_none());
    }
}
