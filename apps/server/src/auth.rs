//! Authentication: argon2 password hashing, JWT issuance, and the request
//! middleware resolving the authenticated user.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, PasswordHasher,
        PasswordVerifier, SaltString,
    },
    Argon2,
};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::main_lib::AppState;
use tripfolio_core::errors::{Error as CoreError, ValidationError};
use tripfolio_core::users::PasswordHasherTrait;

/// The argon2 implementation of the core hasher trait.
pub struct Argon2PasswordHasher;

impl PasswordHasherTrait for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> tripfolio_core::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                CoreError::Unexpected(format!("Password hashing failed: {e}"))
            })
    }

    fn verify(&self, password: &str, hash: &str) -> tripfolio_core::Result<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            CoreError::Validation(ValidationError::InvalidInput(format!(
                "Stored password hash is malformed: {e}"
            )))
        })?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(CoreError::Unexpected(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: usize,
    exp: usize,
}

/// Issues and validates HS256 access tokens.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthManager {
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            validation,
            token_ttl,
        }
    }

    /// Returns the signed token and its lifetime in seconds.
    pub fn issue_token(&self, user_id: &str) -> Result<(String, u64), ApiError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .as_secs() as usize;
        let expires_in = self.token_ttl.as_secs();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + expires_in as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {e}")))?;
        Ok((token, expires_in))
    }

    /// Validates a token and returns the user id it was issued for.
    pub fn verify_token(&self, token: &str) -> Result<String, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))
    }
}

/// Identity of the caller, inserted into request extensions by
/// `auth_middleware` and extracted by handlers via `Extension`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let user_id = state.auth.verify_token(token)?;
    let user = state
        .user_service
        .get_user(&user_id)
        .map_err(|_| ApiError::Unauthorized("Unknown user".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        email: user.email,
    });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let manager = AuthManager::new(b"test-secret", Duration::from_secs(3600));
        let (token, expires_in) = manager.issue_token("user-42").unwrap();

        assert_eq!(expires_in, 3600);
        assert_eq!(manager.verify_token(&token).unwrap(), "user-42");
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let issuer = AuthManager::new(b"secret-a", Duration::from_secs(3600));
        let verifier = AuthManager::new(b"secret-b", Duration::from_secs(3600));

        let (token, _) = issuer.issue_token("user-42").unwrap();
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hasher = Argon2PasswordHasher;
        let hash = hasher.hash("hunter2-but-longer").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("hunter2-but-longer", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = Argon2PasswordHasher;
        assert!(hasher.verify("anything", "not-a-phc-string").is_err());
    }
}
