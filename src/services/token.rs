//! Token service - issues and verifies the two classes of bearer tokens.
//!
//! Access and refresh tokens are signed with distinct keys, both derived
//! from the single shared secret by appending a fixed suffix. A leaked
//! access signing key therefore cannot forge refresh tokens, while the
//! deployment still only manages one secret.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{
    Config, ACCESS_TOKEN_KEY_SUFFIX, ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_KEY_SUFFIX,
    REFRESH_TOKEN_TTL_SECONDS,
};
use crate::domain::User;
use crate::errors::AppResult;

/// JWT claims payload: the user identity embedded in both token classes
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// A signing key pair (encode + decode) derived from the shared secret
struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    fn derive(secret: &str, suffix: &str) -> Self {
        let material = format!("{}{}", secret, suffix);
        Self {
            encoding: EncodingKey::from_secret(material.as_bytes()),
            decoding: DecodingKey::from_secret(material.as_bytes()),
        }
    }
}

/// Issues and verifies access and refresh tokens.
///
/// Verification is synchronous CPU-bound work (signature check plus expiry
/// comparison); nothing here touches the database.
pub struct TokenService {
    access_key: SigningKey,
    refresh_key: SigningKey,
}

impl TokenService {
    /// Create a token service from application configuration
    pub fn new(config: &Config) -> Self {
        Self::with_secret(config.jwt_secret())
    }

    /// Create a token service from a raw shared secret
    pub fn with_secret(secret: &str) -> Self {
        Self {
            access_key: SigningKey::derive(secret, ACCESS_TOKEN_KEY_SUFFIX),
            refresh_key: SigningKey::derive(secret, REFRESH_TOKEN_KEY_SUFFIX),
        }
    }

    /// Issue an access token for the user, valid for 1 hour
    pub fn issue_access_token(&self, user: &User) -> AppResult<String> {
        self.issue(user, &self.access_key, ACCESS_TOKEN_TTL_SECONDS)
    }

    /// Issue a refresh token for the user, valid for 7 days
    pub fn issue_refresh_token(&self, user: &User) -> AppResult<String> {
        self.issue(user, &self.refresh_key, REFRESH_TOKEN_TTL_SECONDS)
    }

    /// Verify an access token and extract its claims.
    /// Fails on invalid signature, malformed token, or expiry.
    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        self.verify(token, &self.access_key)
    }

    /// Verify a refresh token and extract its claims
    pub fn verify_refresh_token(&self, token: &str) -> AppResult<Claims> {
        self.verify(token, &self.refresh_key)
    }

    fn issue(&self, user: &User, key: &SigningKey, ttl_seconds: i64) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            exp: now + ttl_seconds,
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &key.encoding)?;
        Ok(token)
    }

    fn verify(&self, token: &str, key: &SigningKey) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &key.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn test_user() -> User {
        User::new(
            Uuid::new_v4(),
            "al".to_string(),
            "al@x.com".to_string(),
            "hashed".to_string(),
        )
    }

    #[test]
    fn test_access_token_round_trip() {
        let tokens = TokenService::with_secret(TEST_SECRET);
        let user = test_user();

        let token = tokens.issue_access_token(&user).unwrap();
        let claims = tokens.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, user.username);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let tokens = TokenService::with_secret(TEST_SECRET);
        let user = test_user();

        let token = tokens.issue_refresh_token(&user).unwrap();
        let claims = tokens.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_token_classes_are_not_interchangeable() {
        let tokens = TokenService::with_secret(TEST_SECRET);
        let user = test_user();

        let access = tokens.issue_access_token(&user).unwrap();
        let refresh = tokens.issue_refresh_token(&user).unwrap();

        assert!(tokens.verify_refresh_token(&access).is_err());
        assert!(tokens.verify_access_token(&refresh).is_err());
    }

    #[test]
    fn test_different_secrets_reject_each_other() {
        let issuer = TokenService::with_secret(TEST_SECRET);
        let other = TokenService::with_secret("another-secret-key-also-32-chars!!!");
        let user = test_user();

        let token = issuer.issue_access_token(&user).unwrap();
        assert!(other.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let user = test_user();

        // Sign an already-expired token with the derived access key
        let material = format!("{}{}", TEST_SECRET, ACCESS_TOKEN_KEY_SUFFIX);
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            exp: now - 2 * ACCESS_TOKEN_TTL_SECONDS,
            iat: now - 3 * ACCESS_TOKEN_TTL_SECONDS,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(material.as_bytes()),
        )
        .unwrap();

        let tokens = TokenService::with_secret(TEST_SECRET);
        assert!(tokens.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let tokens = TokenService::with_secret(TEST_SECRET);
        let user = test_user();

        let mut token = tokens.issue_access_token(&user).unwrap();
        token.push('x');

        assert!(tokens.verify_access_token(&token).is_err());
    }
}
