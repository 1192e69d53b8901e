/// Authentication service - JWT and password handling
///
/// Access and refresh tokens are signed with separate keys, so a token of
/// one kind never verifies as the other.
use crate::error::{ApiError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use openmusic_core::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct AuthService {
    access_key: String,
    refresh_key: String,
    access_token_age: Duration,
    refresh_token_age: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
}

impl AuthService {
    pub fn new(
        access_key: String,
        refresh_key: String,
        access_token_age_secs: u64,
        refresh_token_age_secs: u64,
    ) -> Self {
        Self {
            access_key,
            refresh_key,
            access_token_age: Duration::seconds(access_token_age_secs as i64),
            refresh_token_age: Duration::seconds(refresh_token_age_secs as i64),
        }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ApiError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ApiError::from)
    }

    /// Create an access token
    pub fn create_access_token(&self, user_id: &UserId) -> Result<String> {
        self.create_token(user_id, &self.access_key, self.access_token_age)
    }

    /// Create a refresh token
    pub fn create_refresh_token(&self, user_id: &UserId) -> Result<String> {
        self.create_token(user_id, &self.refresh_key, self.refresh_token_age)
    }

    /// Verify an access token and return its subject
    pub fn verify_access_token(&self, token: &str) -> Result<UserId> {
        self.verify_token(token, &self.access_key)
    }

    /// Verify a refresh token and return its subject
    pub fn verify_refresh_token(&self, token: &str) -> Result<UserId> {
        self.verify_token(token, &self.refresh_key)
    }

    fn create_token(&self, user_id: &UserId, key: &str, age: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            exp: (now + age).timestamp(),
            iat: now.timestamp(),
        };

        let encoding_key = EncodingKey::from_secret(key.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ApiError::from)
    }

    fn verify_token(&self, token: &str, key: &str) -> Result<UserId> {
        let decoding_key = DecodingKey::from_secret(key.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(UserId::new(token_data.claims.sub))
    }
}
