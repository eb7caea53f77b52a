use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::prelude::*;
use std::fmt;

use crate::errors::{AccountError, InternalError};
use crate::services::crypto;
use crate::types::internal::Claims;

/// Manages JWT token generation and validation
pub struct TokenService {
    jwt_secret: String,
    jwt_expiration_minutes: i64,
    refresh_expiration_days: i64,
    refresh_token_secret: String,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret and refresh token secret
    pub fn new(jwt_secret: String, refresh_token_secret: String) -> Self {
        Self {
            jwt_secret,
            jwt_expiration_minutes: 15,
            refresh_expiration_days: 7,
            refresh_token_secret,
        }
    }

    /// Access token lifetime in seconds
    pub fn jwt_expiration_seconds(&self) -> i64 {
        self.jwt_expiration_minutes * 60
    }

    /// Generate a JWT bound to an account and one of its sessions
    ///
    /// # Arguments
    /// * `user_id` - The account id
    /// * `session_id` - The session the token belongs to
    pub fn generate_jwt(&self, user_id: &str, session_id: &str) -> Result<String, InternalError> {
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            exp: now + self.jwt_expiration_seconds(),
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| InternalError::crypto("generate_jwt", e.to_string()))
    }

    /// Validate a JWT and return the claims
    ///
    /// Only the signature and expiry are checked here; whether the session
    /// is still live is up to the caller.
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AccountError::ExpiredToken("jwt".to_string()),
            _ => AccountError::invalid_token("jwt", e.to_string()),
        })?;

        Ok(token_data.claims)
    }

    /// Generate a cryptographically secure refresh token
    ///
    /// # Returns
    /// * `String` - A base64-encoded random token (32 bytes)
    pub fn generate_refresh_token(&self) -> String {
        let random_bytes: [u8; 32] = rand::rng().random();
        general_purpose::STANDARD.encode(random_bytes)
    }

    /// Hash a refresh token using HMAC-SHA256
    pub fn hash_refresh_token(&self, token: &str) -> String {
        crypto::hmac_sha256_token(&self.refresh_token_secret, token)
    }

    /// Unix timestamp at which a refresh token issued now expires
    pub fn get_refresh_expiration(&self) -> i64 {
        Utc::now().timestamp() + (self.refresh_expiration_days * 24 * 60 * 60)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("refresh_expiration_days", &self.refresh_expiration_days)
            .field("refresh_token_secret", &"<redacted>")
            .finish()
    }
}
