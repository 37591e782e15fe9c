//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User domain entity.
///
/// `refresh_token` is the single session slot: at most one refresh token is
/// valid per user, overwritten on each login and cleared on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty session slot
    pub fn new(id: Uuid, username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the presented refresh token matches the stored slot
    /// byte-for-byte.
    pub fn refresh_token_matches(&self, presented: &str) -> bool {
        self.refresh_token.as_deref() == Some(presented)
    }
}

/// Minimal author projection embedded in blog and comment responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

/// User response (safe to return to client — never carries the password
/// hash or the refresh token)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Unique username
    #[schema(example = "jdoe")]
    pub username: String,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_matching() {
        let mut user = User::new(
            Uuid::new_v4(),
            "al".to_string(),
            "al@x.com".to_string(),
            "hashed".to_string(),
        );

        assert!(!user.refresh_token_matches("anything"));

        user.refresh_token = Some("token-a".to_string());
        assert!(user.refresh_token_matches("token-a"));
        assert!(!user.refresh_token_matches("token-b"));
    }

    #[test]
    fn test_serialization_excludes_secrets() {
        let mut user = User::new(
            Uuid::new_v4(),
            "al".to_string(),
            "al@x.com".to_string(),
            "hashed".to_string(),
        );
        user.refresh_token = Some("secret-token".to_string());

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token").is_none());
    }
}
