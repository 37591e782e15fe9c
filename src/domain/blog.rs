//! Blog domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Author;

/// Publication status of a blog post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
}

impl BlogStatus {
    /// Parse a status filter value; unknown values yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(BlogStatus::Draft),
            "published" => Some(BlogStatus::Published),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
        }
    }
}

impl From<&str> for BlogStatus {
    fn from(s: &str) -> Self {
        BlogStatus::parse(s).unwrap_or(BlogStatus::Draft)
    }
}

impl std::fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Blog domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub slug: String,
    pub user_id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    /// URL of the hosted image on the external asset host
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    /// Ids of users who liked this post
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Check whether the given user authored this blog
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Check whether the given user already liked this blog
    pub fn is_liked_by(&self, user_id: Uuid) -> bool {
        self.likes.contains(&user_id)
    }
}

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Derive a URL slug from a blog title: lowercased, word runs joined by `-`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Blog response with the author embedded as `{id, username}`
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub status: BlogStatus,
    pub likes: Vec<Uuid>,
    pub user: Option<Author>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogResponse {
    pub fn new(blog: Blog, author: Option<Author>) -> Self {
        Self {
            id: blog.id,
            slug: blog.slug,
            title: blog.title,
            short_description: blog.short_description,
            content: blog.content,
            image: blog.image,
            tags: blog.tags,
            status: blog.status,
            likes: blog.likes,
            user: author,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_joins_words() {
        assert_eq!(slugify("My First Blog"), "my-first-blog");
    }

    #[test]
    fn test_slugify_collapses_punctuation() {
        assert_eq!(slugify("Rust & Axum: a tour!"), "rust-axum-a-tour");
        assert_eq!(slugify("  spaced  out  "), "spaced-out");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(BlogStatus::parse("draft"), Some(BlogStatus::Draft));
        assert_eq!(BlogStatus::parse("published"), Some(BlogStatus::Published));
        assert_eq!(BlogStatus::parse("archived"), None);
    }

    #[test]
    fn test_ownership_and_likes() {
        let owner = Uuid::new_v4();
        let fan = Uuid::new_v4();
        let blog = Blog {
            id: Uuid::new_v4(),
            slug: "t".to_string(),
            user_id: owner,
            title: "t".to_string(),
            short_description: "d".to_string(),
            content: "c".to_string(),
            image: None,
            tags: vec![],
            status: BlogStatus::Draft,
            likes: vec![fan],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(blog.is_owned_by(owner));
        assert!(!blog.is_owned_by(fan));
        assert!(blog.is_liked_by(fan));
        assert!(!blog.is_liked_by(owner));
    }
}
