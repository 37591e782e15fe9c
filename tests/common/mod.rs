//! Shared in-memory test doubles for the service-level integration tests.
//!
//! These implement the repository and asset-host traits against plain
//! vectors, so the full auth/blog/comment flows run without a database,
//! Redis, or the real image host.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use blog_api::domain::{Author, Blog, BlogStatus, Comment, User};
use blog_api::errors::AppResult;
use blog_api::infra::{
    AssetStore, BlogFilter, BlogRepository, CommentRepository, NewBlog, SortDirection,
    UnitOfWork, UserRepository,
};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const TEST_ASSET_FOLDER: &str = "blog-images";

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    /// Simulate a user being deleted out from under a live token
    pub fn remove(&self, id: Uuid) {
        self.users.lock().unwrap().retain(|user| user.id != id);
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.refresh_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(
        &self,
        username: String,
        email: String,
        password_hash: String,
    ) -> AppResult<User> {
        let user = User::new(Uuid::new_v4(), username, email, password_hash);
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<String>) -> AppResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.refresh_token = token;
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

// =============================================================================
// Blogs
// =============================================================================

#[derive(Default)]
pub struct InMemoryBlogs {
    blogs: Mutex<Vec<Blog>>,
}

impl InMemoryBlogs {
    pub fn get(&self, id: Uuid) -> Option<Blog> {
        self.blogs
            .lock()
            .unwrap()
            .iter()
            .find(|blog| blog.id == id)
            .cloned()
    }

    fn matches(blog: &Blog, filter: &BlogFilter) -> bool {
        if let Some(term) = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
        {
            let term = term.to_lowercase();
            let hit = blog.title.to_lowercase().contains(&term)
                || blog.short_description.to_lowercase().contains(&term)
                || blog.content.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let Some(status) = filter.status {
            if blog.status != status {
                return false;
            }
        }

        true
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogs {
    async fn list(
        &self,
        filter: BlogFilter,
        sort: SortDirection,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<(Blog, Option<Author>)>> {
        let mut rows: Vec<Blog> = self
            .blogs
            .lock()
            .unwrap()
            .iter()
            .filter(|blog| Self::matches(blog, &filter))
            .cloned()
            .collect();

        rows.sort_by_key(|blog| blog.created_at);
        if sort == SortDirection::Desc {
            rows.reverse();
        }

        Ok(rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|blog| (blog, None))
            .collect())
    }

    async fn count(&self, filter: BlogFilter) -> AppResult<u64> {
        Ok(self
            .blogs
            .lock()
            .unwrap()
            .iter()
            .filter(|blog| Self::matches(blog, &filter))
            .count() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Blog>> {
        Ok(self.get(id))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<(Blog, Option<Author>)>> {
        Ok(self
            .blogs
            .lock()
            .unwrap()
            .iter()
            .find(|blog| blog.slug == slug)
            .cloned()
            .map(|blog| (blog, None)))
    }

    async fn create(&self, data: NewBlog) -> AppResult<Blog> {
        let now = Utc::now();
        let blog = Blog {
            id: Uuid::new_v4(),
            slug: data.slug,
            user_id: data.user_id,
            title: data.title,
            short_description: data.short_description,
            content: data.content,
            image: data.image,
            tags: data.tags,
            status: BlogStatus::Draft,
            likes: vec![],
            created_at: now,
            updated_at: now,
        };
        self.blogs.lock().unwrap().push(blog.clone());
        Ok(blog)
    }

    async fn update_content(
        &self,
        id: Uuid,
        title: String,
        short_description: String,
        content: String,
        tags: Vec<String>,
    ) -> AppResult<Blog> {
        let mut blogs = self.blogs.lock().unwrap();
        let blog = blogs
            .iter_mut()
            .find(|blog| blog.id == id)
            .ok_or(blog_api::AppError::NotFound)?;

        blog.title = title;
        blog.short_description = short_description;
        blog.content = content;
        blog.tags = tags;
        blog.updated_at = Utc::now();
        Ok(blog.clone())
    }

    async fn set_status(&self, id: Uuid, status: BlogStatus) -> AppResult<Blog> {
        let mut blogs = self.blogs.lock().unwrap();
        let blog = blogs
            .iter_mut()
            .find(|blog| blog.id == id)
            .ok_or(blog_api::AppError::NotFound)?;

        blog.status = status;
        blog.updated_at = Utc::now();
        Ok(blog.clone())
    }

    async fn set_likes(&self, id: Uuid, likes: Vec<Uuid>) -> AppResult<Blog> {
        let mut blogs = self.blogs.lock().unwrap();
        let blog = blogs
            .iter_mut()
            .find(|blog| blog.id == id)
            .ok_or(blog_api::AppError::NotFound)?;

        blog.likes = likes;
        blog.updated_at = Utc::now();
        Ok(blog.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut blogs = self.blogs.lock().unwrap();
        let before = blogs.len();
        blogs.retain(|blog| blog.id != id);
        if blogs.len() == before {
            return Err(blog_api::AppError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Default)]
pub struct InMemoryComments {
    comments: Mutex<Vec<Comment>>,
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn list_for_blog(&self, blog_id: Uuid) -> AppResult<Vec<(Comment, Option<Author>)>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|comment| comment.blog_id == blog_id)
            .cloned()
            .map(|comment| (comment, None))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|comment| comment.id == id)
            .cloned())
    }

    async fn create(&self, blog_id: Uuid, user_id: Uuid, content: String) -> AppResult<Comment> {
        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            blog_id,
            user_id,
            content,
            created_at: now,
            updated_at: now,
        };
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut comments = self.comments.lock().unwrap();
        let before = comments.len();
        comments.retain(|comment| comment.id != id);
        if comments.len() == before {
            return Err(blog_api::AppError::NotFound);
        }
        Ok(())
    }
}

// =============================================================================
// Unit of Work
// =============================================================================

#[derive(Default)]
pub struct TestUow {
    pub users: Arc<InMemoryUsers>,
    pub blogs: Arc<InMemoryBlogs>,
    pub comments: Arc<InMemoryComments>,
}

impl UnitOfWork for TestUow {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn blogs(&self) -> Arc<dyn BlogRepository> {
        self.blogs.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comments.clone()
    }
}

// =============================================================================
// Asset host
// =============================================================================

/// Asset store double that records every upload and delete
#[derive(Default)]
pub struct RecordingAssetStore {
    pub uploads: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
}

#[async_trait]
impl AssetStore for RecordingAssetStore {
    async fn upload(&self, filename: &str, _bytes: Vec<u8>) -> AppResult<String> {
        self.uploads.lock().unwrap().push(filename.to_string());
        Ok(format!(
            "https://assets.test/v1/{}/{}",
            TEST_ASSET_FOLDER, filename
        ))
    }

    async fn delete(&self, public_id: &str) -> AppResult<()> {
        self.deletes.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}
