//! Comment service - per-blog comment threads.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Author, Comment};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Comment service trait for dependency injection.
#[async_trait]
pub trait CommentService: Send + Sync {
    /// List all comments for a blog, with authors embedded
    async fn list_comments(&self, blog_id: Uuid) -> AppResult<Vec<(Comment, Option<Author>)>>;

    /// Add a comment to a blog; the blog must exist
    async fn add_comment(
        &self,
        caller_id: Uuid,
        blog_id: Uuid,
        content: String,
    ) -> AppResult<Comment>;

    /// Delete a comment; only its author may do this (403 otherwise)
    async fn delete_comment(&self, caller_id: Uuid, comment_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of CommentService using Unit of Work.
pub struct CommentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CommentManager<U> {
    /// Create new comment service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CommentService for CommentManager<U> {
    async fn list_comments(&self, blog_id: Uuid) -> AppResult<Vec<(Comment, Option<Author>)>> {
        self.uow.comments().list_for_blog(blog_id).await
    }

    async fn add_comment(
        &self,
        caller_id: Uuid,
        blog_id: Uuid,
        content: String,
    ) -> AppResult<Comment> {
        // Commenting on a missing blog is NotFound, not a constraint error
        if self.uow.blogs().find_by_id(blog_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        self.uow.comments().create(blog_id, caller_id, content).await
    }

    async fn delete_comment(&self, caller_id: Uuid, comment_id: Uuid) -> AppResult<()> {
        let comment = self
            .uow
            .comments()
            .find_by_id(comment_id)
            .await?
            .ok_or_not_found()?;

        // Comment ownership violations report Forbidden, unlike blog
        // ownership which reports Unauthorized
        if !comment.is_owned_by(caller_id) {
            return Err(AppError::Forbidden);
        }

        self.uow.comments().delete(comment_id).await
    }
}
