//! Authentication service - registration, login and the refresh-token
//! session lifecycle.
//!
//! Each user has a single refresh-token slot: login overwrites it,
//! logout clears it, and refresh validates against it without rotating
//! it. Concurrent logins for the same user race on the slot and the last
//! writer wins.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::token::TokenService;
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Token pair returned after a successful login
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived JWT access token (1 hour)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Long-lived JWT refresh token (7 days), also stored on the user record
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, username: String, email: String, password: String)
        -> AppResult<User>;

    /// Login, persist the new refresh token and return both tokens
    async fn login(&self, email: String, password: String) -> AppResult<TokenPair>;

    /// Exchange a refresh token for a new access token.
    /// The stored refresh token is left unchanged.
    async fn refresh(&self, refresh_token: &str) -> AppResult<String>;

    /// Invalidate the session whose stored refresh token matches
    async fn logout(&self, refresh_token: &str) -> AppResult<()>;

    /// Resolve an access token to a live user (the Session Guard step)
    async fn authenticate(&self, access_token: &str) -> AppResult<User>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: TokenService,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, tokens: TokenService) -> Self {
        Self { uow, tokens }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        // Uniqueness pre-check; the database constraints remain the backstop
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }
        if self.uow.users().find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow.users().create(username, email, password_hash).await
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenPair> {
        // Unknown email is NotFound; a wrong password for a known email is
        // Unauthorized. The two cases are deliberately distinguishable.
        let user = self
            .uow
            .users()
            .find_by_email(&email)
            .await?
            .ok_or_not_found()?;

        let stored = Password::from_hash(user.password_hash.clone());
        if !stored.verify(&password) {
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.tokens.issue_access_token(&user)?;
        let refresh_token = self.tokens.issue_refresh_token(&user)?;

        // Overwrite the session slot; any previously issued refresh token
        // for this user is invalidated from here on
        self.uow
            .users()
            .set_refresh_token(user.id, Some(refresh_token.clone()))
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self
            .tokens
            .verify_refresh_token(refresh_token)
            .map_err(|_| AppError::Unauthorized)?;

        // A validly-signed token is still rejected unless it is the exact
        // value in the user's slot: this covers both "no session" and
        // "replaced by a newer login"
        let user = self
            .uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !user.refresh_token_matches(refresh_token) {
            return Err(AppError::Unauthorized);
        }

        self.tokens.issue_access_token(&user)
    }

    async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        let user = self
            .uow
            .users()
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or_not_found()?;

        self.uow.users().set_refresh_token(user.id, None).await?;

        tracing::info!(user_id = %user.id, "User logged out");

        Ok(())
    }

    async fn authenticate(&self, access_token: &str) -> AppResult<User> {
        let claims = self.tokens.verify_access_token(access_token)?;

        // A stale-but-validly-signed token pointing at a deleted user yields
        // NotFound, not Unauthorized
        self.uow
            .users()
            .find_by_id(claims.sub)
            .await?
            .ok_or_not_found()
    }
}
